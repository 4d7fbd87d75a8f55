use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Get the per-user data directory
///
/// Returns `$XDG_DATA_HOME` when set, otherwise the platform data directory
/// (`~/.local/share` on Linux, `~/Library/Application Support` on macOS).
pub fn data_dir() -> Result<PathBuf> {
    if let Some(base) = env::var_os("XDG_DATA_HOME").filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(base));
    }

    directories::BaseDirs::new()
        .context("Failed to get home directory")
        .map(|bd| bd.data_dir().to_path_buf())
}
