//! Domain layer for imgfinder.
//!
//! Core types shared by every other layer, free of terminal, HTTP or runtime
//! concerns.
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Image results and the provider page contract

pub mod error;
pub mod image;

pub use error::{ImgFinderError, Result};
pub use image::{ImageResult, PageRequest, SearchPage, MAX_PER_PAGE, MIN_PER_PAGE};
