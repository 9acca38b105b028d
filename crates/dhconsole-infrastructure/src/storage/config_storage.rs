//! Console config file storage.
//!
//! Reads `config.toml` into [`ConsoleConfig`], layers `DHCONSOLE_*` environment
//! overrides on top and writes changes back atomically.

use super::write_atomic;
use crate::paths::ConsolePaths;
use dhconsole_core::config::ConsoleConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HOST_ENV: &str = "DHCONSOLE_HOST";
pub const PORT_ENV: &str = "DHCONSOLE_PORT";
pub const USE_SSL_ENV: &str = "DHCONSOLE_USE_SSL";
pub const LANGUAGE_ENV: &str = "DHCONSOLE_LANGUAGE";
pub const TARGET_UID_ENV: &str = "DHCONSOLE_TARGET_UID";

/// Errors that can occur during config storage operations.
#[derive(Debug)]
pub enum ConfigStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// An environment override could not be parsed.
    InvalidOverride { var: &'static str, value: String },
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for ConfigStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigStorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigStorageError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            ConfigStorageError::InvalidOverride { var, value } => {
                write!(f, "Invalid value for {}: {:?}", var, value)
            }
            ConfigStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine configuration directory")
            }
        }
    }
}

impl std::error::Error for ConfigStorageError {}

impl From<std::io::Error> for ConfigStorageError {
    fn from(e: std::io::Error) -> Self {
        ConfigStorageError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigStorageError {
    fn from(e: toml::de::Error) -> Self {
        ConfigStorageError::TomlParseError(e)
    }
}

impl From<toml::ser::Error> for ConfigStorageError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigStorageError::TomlSerError(e)
    }
}

/// Storage for `config.toml`.
///
/// - **Atomicity**: saves go through a tmp file and an atomic rename
/// - **Defaults**: a missing or empty file yields [`ConsoleConfig::default`]
/// - **Overrides**: [`ConfigStorage::load_effective`] applies environment variables
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a config storage handle for `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a config storage handle at the default location.
    pub fn default_location() -> Result<Self, ConfigStorageError> {
        let path = ConsolePaths::config_file().map_err(|_| ConfigStorageError::ConfigDirNotFound)?;
        Ok(Self::new(path))
    }

    /// Loads the file as written, without environment overrides.
    pub fn load(&self) -> Result<ConsoleConfig, ConfigStorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Config file not found, using defaults");
            return Ok(ConsoleConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConsoleConfig::default());
        }

        Ok(toml::from_str(&content)?)
    }

    /// Loads the file and applies `DHCONSOLE_*` environment overrides.
    pub fn load_effective(&self) -> Result<ConsoleConfig, ConfigStorageError> {
        let mut config = self.load()?;
        apply_overrides(&mut config, |var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Saves the config atomically.
    pub fn save(&self, config: &ConsoleConfig) -> Result<(), ConfigStorageError> {
        let toml_string = toml::to_string_pretty(config)?;
        write_atomic(&self.path, toml_string.as_bytes(), false)?;
        Ok(())
    }

    /// Loads, modifies and saves the stored config.
    ///
    /// Environment overrides are not applied, so they never leak into the file.
    pub fn update<F>(&self, f: F) -> Result<ConsoleConfig, ConfigStorageError>
    where
        F: FnOnce(&mut ConsoleConfig),
    {
        let mut config = self.load()?;
        f(&mut config);
        self.save(&config)?;
        Ok(config)
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Applies overrides from `lookup`, which maps a variable name to its value.
pub fn apply_overrides<F>(config: &mut ConsoleConfig, lookup: F) -> Result<(), ConfigStorageError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(HOST_ENV) {
        config.muip.host = host;
    }
    if let Some(port) = lookup(PORT_ENV) {
        config.muip.port = parse_override(PORT_ENV, port)?;
    }
    if let Some(use_ssl) = lookup(USE_SSL_ENV) {
        config.muip.use_ssl = parse_bool(USE_SSL_ENV, use_ssl)?;
    }
    if let Some(language) = lookup(LANGUAGE_ENV) {
        config.language = language;
    }
    if let Some(uid) = lookup(TARGET_UID_ENV) {
        config.target_uid = parse_override(TARGET_UID_ENV, uid)?;
    }
    Ok(())
}

fn parse_override<T: std::str::FromStr>(
    var: &'static str,
    value: String,
) -> Result<T, ConfigStorageError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigStorageError::InvalidOverride { var, value })
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigStorageError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigStorageError::InvalidOverride { var, value }),
    }
}
