//! Path helpers for user-supplied locations in the config file and CLI flags.

use std::path::{Path, PathBuf};

/// Expand a leading `~/` to the current user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Return an error message when an output path is not absolute.
pub fn require_absolute(path: &Path) -> Result<(), String> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(format!("Output file path must be absolute: {}", path.display()))
    }
}
