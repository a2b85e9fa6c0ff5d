//! Terminal runtime and entry point.
//!
//! Owns everything the library layers leave out: the terminal (raw mode,
//! alternate screen), the fetch worker thread and the event loop tying them to
//! [`handle_event`].
//!
//! ```text
//! ┌──────────────────────────┐        ┌──────────────────────────┐
//! │   UI thread              │ ticket │   imgfinder-fetch        │
//! │  key → Event → AppState  │ ─────▶ │  tokio task per fetch    │
//! │  frame ← render          │ ◀───── │  PixabayProvider::search │
//! └──────────────────────────┘response└──────────────────────────┘
//! ```
//!
//! The loop polls for terminal input every 50 ms and drains worker responses
//! in between, so results appear without a key press.

use clap::Parser;
use crossterm::event::{self as term, Event as TermEvent};
use crossterm::{cursor, execute, terminal};
use imgfinder::app::{handle_event, map_key_event, Action, AppState, Event};
use imgfinder::domain::error::Result;
use imgfinder::provider::{ImageSearchProvider, PixabayProvider};
use imgfinder::worker::{FetchWorker, WorkerResponse};
use imgfinder::{infrastructure, initialize, observability, ui, Config};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Search Pixabay images from the terminal.
#[derive(Debug, Parser)]
#[command(name = "imgfinder", version, about)]
struct Cli {
    /// Configuration file (default: <config dir>/imgfinder/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Query to search for on start-up
    #[arg(short, long)]
    query: Option<String>,

    /// Built-in theme name, overriding the configuration
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Tracing filter, overriding the configuration (e.g. "debug")
    #[arg(long, value_name = "LEVEL", env = "IMGFINDER_TRACE_LEVEL")]
    trace_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);
    observability::shutdown_tracing();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("imgfinder: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(theme) = cli.theme {
        config.theme_name = Some(theme);
        config.theme_file = None;
    }
    if let Some(level) = cli.trace_level {
        config.trace_level = Some(level);
    }

    // Tracing is optional; the UI works without a writable data directory.
    if let Ok(trace_file) = observability::init_tracing(&config) {
        tracing::info!(trace_file = %trace_file.display(), ?config, "imgfinder starting");
    }

    let provider: Arc<dyn ImageSearchProvider> = Arc::new(PixabayProvider::from_config(&config)?);
    let (response_tx, response_rx) = mpsc::channel();
    let worker = FetchWorker::spawn(provider, response_tx)?;

    let mut state = initialize(&config);
    let (cols, rows) = terminal::size()?;

    let _terminal = TerminalGuard::enter()?;
    let mut runtime = Runtime {
        worker,
        responses: response_rx,
        rows: usize::from(rows),
        cols: usize::from(cols),
        dirty: true,
    };

    if let Some(query) = cli.query {
        state.input = query;
        if runtime.dispatch(&mut state, &Event::Submit)? {
            return Ok(());
        }
    }

    runtime.run(&mut state)
}

/// Event loop state kept outside [`AppState`]: terminal size, the worker
/// handle and whether the frame needs redrawing.
struct Runtime {
    worker: FetchWorker,
    responses: mpsc::Receiver<WorkerResponse>,
    rows: usize,
    cols: usize,
    dirty: bool,
}

impl Runtime {
    fn run(&mut self, state: &mut AppState) -> Result<()> {
        let mut stdout = io::stdout();

        loop {
            while let Ok(response) = self.responses.try_recv() {
                if self.dispatch(state, &Event::Worker(response))? {
                    return Ok(());
                }
            }

            if self.dirty {
                let frame = ui::render(state, self.rows, self.cols);
                stdout.write_all(frame.as_bytes())?;
                stdout.flush()?;
                self.dirty = false;
            }

            if !term::poll(POLL_INTERVAL)? {
                continue;
            }

            let event = match term::read()? {
                TermEvent::Key(key) => map_key_event(state, &key),
                TermEvent::Resize(cols, rows) => {
                    self.cols = usize::from(cols);
                    self.rows = usize::from(rows);
                    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                    Some(Event::Resize)
                }
                _ => None,
            };

            if let Some(event) = event {
                if self.dispatch(state, &event)? {
                    return Ok(());
                }
            }
        }
    }

    /// Handles one event and executes its actions. Returns `true` on quit.
    fn dispatch(&mut self, state: &mut AppState, event: &Event) -> Result<bool> {
        let _span = tracing::info_span!("dispatch").entered();
        let (should_render, actions) = handle_event(state, event)?;
        self.dirty |= should_render;

        for action in actions {
            match action {
                Action::PostToWorker(message) => self.worker.post(message)?,
                Action::OpenInBrowser { url } => {
                    if let Err(e) = infrastructure::open_in_browser(&url) {
                        tracing::warn!(url = %url, error = %e, "failed to open external viewer");
                    }
                }
                Action::Quit => {
                    tracing::info!("quit requested");
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// Raw mode plus alternate screen for as long as the guard lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
