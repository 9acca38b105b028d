//! Configuration types for the console client.
//!
//! Loading and persistence live in `dhconsole-infrastructure`; this module only
//! defines the shapes and their defaults.

use serde::{Deserialize, Serialize};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 443;
const DEFAULT_PATH: &str = "/muip";
const DEFAULT_MIN_CALL_INTERVAL_MS: u64 = 100;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_KEY_TYPE: &str = "PEM";
const DEFAULT_LANGUAGE: &str = "en";

/// Root of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub muip: MuipConfig,
    /// Locale code used for game text lookups (`en`, `zh_CN`, ...).
    pub language: String,
    /// Player uid that commands are executed against.
    pub target_uid: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            muip: MuipConfig::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            target_uid: 0,
        }
    }
}

/// Connection settings for the server's MUIP admin endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MuipConfig {
    pub host: String,
    pub port: u16,
    /// Path prefix of the MUIP routes, e.g. `/muip`.
    pub path: String,
    /// Endpoint mode tried first. Becomes sticky after a fallback succeeds.
    pub use_ssl: bool,
    /// Accept self-signed certificates on the secure endpoint.
    pub accept_invalid_certs: bool,
    /// Minimum spacing between the starts of two outbound calls.
    pub min_call_interval_ms: u64,
    /// Per-request timeout at the transport boundary.
    pub request_timeout_secs: u64,
    /// Public key encoding requested at session creation.
    pub key_type: String,
}

impl Default for MuipConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            use_ssl: false,
            accept_invalid_certs: false,
            min_call_interval_ms: DEFAULT_MIN_CALL_INTERVAL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            key_type: DEFAULT_KEY_TYPE.to_string(),
        }
    }
}

impl MuipConfig {
    /// Base URL for the given transport mode, without a trailing slash.
    pub fn base_url(&self, secure: bool) -> String {
        let scheme = if secure { "https" } else { "http" };
        let path = self.path.trim_end_matches('/');
        let path = if path.is_empty() || path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        format!("{scheme}://{}:{}{}", self.host, self.port, path)
    }
}

/// Contents of `secret.json`: the one credential the console persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_urls() {
        let config = MuipConfig::default();
        assert_eq!(config.base_url(false), "http://127.0.0.1:443/muip");
        assert_eq!(config.base_url(true), "https://127.0.0.1:443/muip");
    }

    #[test]
    fn test_base_url_normalizes_path() {
        let config = MuipConfig {
            host: "game.local".into(),
            port: 8080,
            path: "muip/".into(),
            ..MuipConfig::default()
        };
        assert_eq!(config.base_url(false), "http://game.local:8080/muip");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ConsoleConfig = toml::from_str("language = \"ja\"\n[muip]\nport = 520\n").unwrap();
        assert_eq!(config.language, "ja");
        assert_eq!(config.muip.port, 520);
        assert_eq!(config.muip.host, "127.0.0.1");
        assert_eq!(config.muip.min_call_interval_ms, 100);
    }
}
