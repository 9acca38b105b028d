//! Secret configuration file storage.
//!
//! Loads and persists the admin key in ~/.config/dhconsole/secret.json.

use super::write_atomic;
use crate::paths::ConsolePaths;
use dhconsole_core::config::SecretConfig;
use std::fs;
use std::path::PathBuf;

/// Environment variable consulted when secret.json holds no admin key.
pub const ADMIN_KEY_ENV: &str = "DHCONSOLE_ADMIN_KEY";

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine configuration directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

/// Storage for the secret configuration file (secret.json).
///
/// A missing file is an empty configuration, not an error: the console runs
/// without a key until one is set.
///
/// # Security Note
///
/// The key is stored as plaintext JSON. Every save rewrites the file with mode
/// 600 on Unix.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a SecretStorage at the default path.
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = ConsolePaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration, returning the empty default when the
    /// file does not exist.
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Ok(SecretConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Writes the secret configuration atomically.
    pub fn save(&self, config: &SecretConfig) -> Result<(), SecretStorageError> {
        let content = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, content.as_bytes(), true)?;
        Ok(())
    }

    /// Persists `admin_key`, replacing any stored key.
    pub fn save_admin_key(&self, admin_key: &str) -> Result<(), SecretStorageError> {
        let mut config = self.load()?;
        config.admin_key = Some(admin_key.to_string());
        self.save(&config)
    }

    /// Returns the stored key, falling back to `DHCONSOLE_ADMIN_KEY`.
    pub fn resolve_admin_key(&self) -> Result<Option<String>, SecretStorageError> {
        self.resolve_admin_key_with(std::env::var(ADMIN_KEY_ENV).ok())
    }

    fn resolve_admin_key_with(
        &self,
        env_value: Option<String>,
    ) -> Result<Option<String>, SecretStorageError> {
        let stored = self.load()?.admin_key.filter(|key| !key.is_empty());
        Ok(stored.or_else(|| env_value.filter(|key| !key.is_empty())))
    }

    /// Returns the path to the secret file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));

        let config = storage.load().unwrap();
        assert!(config.admin_key.is_none());
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{ "admin_key": "abc-123" }"#).unwrap();

        let storage = SecretStorage::with_path(file_path);
        let config = storage.load().unwrap();
        assert_eq!(config.admin_key.as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{ invalid json"#).unwrap();

        let storage = SecretStorage::with_path(file_path);
        assert!(matches!(storage.load(), Err(SecretStorageError::ParseError(_))));
    }

    #[test]
    fn test_save_admin_key_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("secret.json");
        let storage = SecretStorage::with_path(file_path.clone());

        storage.save_admin_key("first").unwrap();
        storage.save_admin_key("second").unwrap();

        assert_eq!(storage.load().unwrap().admin_key.as_deref(), Some("second"));
        assert!(!temp_dir.path().join("nested").join(".secret.json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let storage = SecretStorage::with_path(file_path.clone());
        storage.save_admin_key("key").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_stored_key_wins_over_env() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));

        assert_eq!(
            storage.resolve_admin_key_with(Some("from-env".into())).unwrap().as_deref(),
            Some("from-env")
        );
        assert_eq!(storage.resolve_admin_key_with(Some(String::new())).unwrap(), None);

        storage.save_admin_key("stored").unwrap();
        assert_eq!(
            storage.resolve_admin_key_with(Some("from-env".into())).unwrap().as_deref(),
            Some("stored")
        );
    }
}
