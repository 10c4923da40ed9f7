//! Path management for Courtside configuration files.

use courtside_core::{CourtsideError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "courtside";
const CONFIG_FILE: &str = "config.toml";

/// Resolves where Courtside keeps its files.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/courtside/         # Platform config directory (via `dirs`)
/// ├── config.toml              # Client configuration
/// └── config.lock              # Present only while a write is in progress
/// ```
///
/// The admin key is never stored here.
pub struct CourtsidePaths;

impl CourtsidePaths {
    /// Returns the Courtside configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/courtside/` on Linux
    /// - `Err(CourtsideError::Config)`: the platform has no config directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| CourtsideError::config("Cannot find the user config directory"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Resolves the config file, honouring an explicit `--config` path.
    pub fn resolve_config_file(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }
}
