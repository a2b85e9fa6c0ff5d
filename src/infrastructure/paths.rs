//! Platform path resolution.
//!
//! Locations follow the platform conventions exposed by the `dirs` crate, e.g.
//! `~/.config/imgfinder` and `~/.local/share/imgfinder` on Linux.

use std::path::PathBuf;

const APP_DIR: &str = "imgfinder";

/// File name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the data directory for imgfinder, where trace files are written.
///
/// Falls back to the system temp directory when the platform has no data
/// directory (e.g. no `$HOME`).
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Returns the configuration directory for imgfinder, if the platform has one.
#[must_use]
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Returns the default configuration file path.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use imgfinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
