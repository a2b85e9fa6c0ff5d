//! Key bindings translating terminal key events into application events.
//!
//! Bindings depend on the input mode and on whether the preview overlay is
//! open; the overlay captures every key except `Ctrl+c`.

use crate::app::handler::Event;
use crate::app::modes::InputMode;
use crate::app::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Maps a key event to an application event, or `None` if the key is unbound
/// in the current state.
#[must_use]
pub fn map_key_event(state: &AppState, key: &KeyEvent) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Event::Quit),
            _ => None,
        };
    }

    if state.session.preview().is_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Event::ClosePreview),
            KeyCode::Char('o') => Some(Event::OpenExternal),
            _ => None,
        };
    }

    match state.input_mode {
        InputMode::Typing => match key.code {
            KeyCode::Enter => Some(Event::Submit),
            KeyCode::Esc | KeyCode::Tab | KeyCode::Down => Some(Event::FocusGallery),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Char(c) => Some(Event::Char(c)),
            _ => None,
        },
        InputMode::Browsing => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Event::KeyDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Event::KeyUp),
            KeyCode::Enter => Some(Event::OpenSelected),
            KeyCode::Char('m') | KeyCode::PageDown => Some(Event::LoadMore),
            KeyCode::Char('/' | 'i') | KeyCode::Tab => Some(Event::FocusSearch),
            KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
            _ => None,
        },
    }
}
