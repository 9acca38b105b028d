//! Path resolution for console configuration files.
//!
//! ```text
//! ~/.config/dhconsole/
//! ├── config.toml     # Connection and display settings
//! └── secret.json     # Persisted admin key
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "dhconsole";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the console.
pub struct ConsolePaths;

impl ConsolePaths {
    /// Returns the console configuration directory (XDG on Linux, platform
    /// equivalent elsewhere).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to `secret.json`.
    ///
    /// # Security Note
    ///
    /// The file holds the server admin key and is written with mode 600 on Unix.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}
