//! Network side of the console: the HTTP transport, RSA payload encryption,
//! global call pacing and the session manager that ties them together.

pub mod crypto;
pub mod envelope;
pub mod http_transport;
pub mod pacer;
pub mod session_manager;

pub use crypto::RsaEncryptor;
pub use envelope::decode_message;
pub use http_transport::HttpMuipTransport;
pub use pacer::CallPacer;
pub use session_manager::{ActiveSession, SessionManager};

use dhconsole_core::config::MuipConfig;
use dhconsole_core::{EndpointMode, Result};
use std::sync::Arc;

/// Builds a session manager over HTTP from connection settings.
pub fn http_session_manager(
    config: &MuipConfig,
    admin_key: Option<String>,
) -> Result<SessionManager<HttpMuipTransport>> {
    let transport = Arc::new(HttpMuipTransport::new(config)?);
    let pacer = Arc::new(CallPacer::from_millis(config.min_call_interval_ms));
    Ok(SessionManager::new(
        transport,
        pacer,
        admin_key,
        config.key_type.clone(),
        EndpointMode::from_ssl(config.use_ssl),
    ))
}
