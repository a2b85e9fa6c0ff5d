//! Terminal user interface rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color schemes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    EmptyState, FooterInfo, GalleryItem, HeaderInfo, LoadMoreInfo, PreviewInfo, SearchBarInfo,
    StatusLine, UIViewModel,
};
