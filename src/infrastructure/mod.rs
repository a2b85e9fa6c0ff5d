//! Infrastructure layer for filesystem and desktop interactions.

pub mod paths;

pub use paths::{default_config_file, expand_tilde, get_config_dir, get_data_dir};

use crate::domain::error::Result;

/// Opens `url` with the desktop's default handler without waiting for it.
///
/// # Errors
///
/// Returns [`ImgFinderError::Io`](crate::domain::ImgFinderError::Io) if no
/// handler could be launched.
pub fn open_in_browser(url: &str) -> Result<()> {
    tracing::debug!(url = %url, "launching external viewer");
    open::that_detached(url)?;
    Ok(())
}
