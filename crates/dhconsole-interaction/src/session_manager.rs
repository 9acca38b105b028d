//! Session lifecycle over a [`MuipTransport`].
//!
//! The manager owns the one live session of the process. Renewal runs inside
//! a single async mutex, so callers that find the session missing or expired
//! at the same moment wait for one renewal instead of racing their own.

use crate::crypto::RsaEncryptor;
use crate::envelope::decode_message;
use crate::pacer::CallPacer;
use chrono::Utc;
use dhconsole_core::model::{PlayerInformation, ServerInformation};
use dhconsole_core::transport::SessionGrant;
use dhconsole_core::{ConsoleError, EndpointMode, MuipTransport, Result, Session};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// A session together with the encryptor for its public key.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub session: Session,
    encryptor: RsaEncryptor,
}

impl ActiveSession {
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        self.encryptor.encrypt(plaintext)
    }
}

#[derive(Debug)]
struct SessionState {
    active: Option<ActiveSession>,
    mode: EndpointMode,
}

pub struct SessionManager<T: MuipTransport> {
    transport: Arc<T>,
    pacer: Arc<CallPacer>,
    admin_key: Option<String>,
    key_type: String,
    state: Mutex<SessionState>,
}

impl<T: MuipTransport> SessionManager<T> {
    pub fn new(
        transport: Arc<T>,
        pacer: Arc<CallPacer>,
        admin_key: Option<String>,
        key_type: impl Into<String>,
        initial_mode: EndpointMode,
    ) -> Self {
        Self {
            transport,
            pacer,
            admin_key,
            key_type: key_type.into(),
            state: Mutex::new(SessionState {
                active: None,
                mode: initial_mode,
            }),
        }
    }

    /// The endpoint mode new sessions are created on first.
    pub async fn current_mode(&self) -> EndpointMode {
        self.state.lock().await.mode
    }

    /// Snapshot of the live session, if any.
    pub async fn session(&self) -> Option<Session> {
        self.state
            .lock()
            .await
            .active
            .as_ref()
            .map(|active| active.session.clone())
    }

    /// Drops the live session so the next call renews.
    pub async fn invalidate(&self) {
        self.state.lock().await.active = None;
    }

    /// Returns the live session, renewing it when missing or expired.
    pub async fn ensure_session(&self) -> Result<ActiveSession> {
        let mut state = self.state.lock().await;
        if let Some(active) = &state.active {
            if !active.session.is_expired_at(Utc::now()) {
                return Ok(active.clone());
            }
            debug!(session_id = %active.session.session_id, "Session expired");
        }

        state.active = None;
        let active = self.renew(&mut state).await?;
        state.active = Some(active.clone());
        Ok(active)
    }

    async fn renew(&self, state: &mut SessionState) -> Result<ActiveSession> {
        let admin_key = self
            .admin_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConsoleError::config("Admin key is not set"))?;

        let (grant, mode) = self.create_with_fallback(state).await?;
        let session = Session::from_grant(grant, mode);
        let encryptor = RsaEncryptor::from_pem(&session.rsa_public_key)?;

        let encrypted_key = encryptor.encrypt(admin_key)?;
        self.pacer.pace().await;
        self.transport
            .authorize_admin(mode, &session.session_id, &encrypted_key)
            .await?
            .into_unit()?;

        info!(
            session_id = %session.session_id,
            secure = mode.is_secure(),
            expire_at = %session.expire_at,
            "MUIP session established"
        );
        Ok(ActiveSession { session, encryptor })
    }

    /// Creates a session on the sticky mode, then once on the opposite mode.
    async fn create_with_fallback(
        &self,
        state: &mut SessionState,
    ) -> Result<(SessionGrant, EndpointMode)> {
        let primary = state.mode;
        let primary_err = match self.create_on(primary).await {
            Ok(grant) => return Ok((grant, primary)),
            Err(err) => err,
        };
        warn!(secure = primary.is_secure(), error = %primary_err, "Session creation failed, trying the other endpoint");

        let fallback = primary.opposite();
        match self.create_on(fallback).await {
            Ok(grant) => {
                info!(secure = fallback.is_secure(), "Switched endpoint mode");
                state.mode = fallback;
                Ok((grant, fallback))
            }
            Err(fallback_err) => Err(ConsoleError::session(format!(
                "Session creation failed on both endpoints ({}: {}; {}: {})",
                mode_label(primary),
                primary_err,
                mode_label(fallback),
                fallback_err
            ))),
        }
    }

    async fn create_on(&self, mode: EndpointMode) -> Result<SessionGrant> {
        self.pacer.pace().await;
        debug!(secure = mode.is_secure(), "Creating session");
        self.transport
            .create_session(mode, &self.key_type)
            .await?
            .into_data()
    }

    /// Encrypts and runs one command, returning the decoded output text.
    ///
    /// Commands are never retried. A transport failure also drops the session.
    pub async fn execute_command(&self, command: &str, target_uid: u32) -> Result<String> {
        let active = self.ensure_session().await?;
        let encrypted = active.encrypt(command)?;
        let session_id = &active.session.session_id;

        self.pacer.pace().await;
        let response = match self
            .transport
            .execute_command(active.session.endpoint_mode(), session_id, &encrypted, target_uid)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                self.invalidate_if_current(session_id).await;
                return Err(err);
            }
        };

        let data = response.into_data()?;
        decode_message(&data.message)
    }

    pub async fn server_information(&self) -> Result<ServerInformation> {
        let active = self.ensure_session().await?;
        let session_id = &active.session.session_id;

        self.pacer.pace().await;
        match self
            .transport
            .server_information(active.session.endpoint_mode(), session_id)
            .await
        {
            Ok(response) => response.into_data(),
            Err(err) => {
                self.invalidate_if_current(session_id).await;
                Err(err)
            }
        }
    }

    pub async fn player_information(&self, uid: u32) -> Result<PlayerInformation> {
        let active = self.ensure_session().await?;
        let session_id = &active.session.session_id;

        self.pacer.pace().await;
        match self
            .transport
            .player_information(active.session.endpoint_mode(), session_id, uid)
            .await
        {
            Ok(response) => response.into_data(),
            Err(err) => {
                self.invalidate_if_current(session_id).await;
                Err(err)
            }
        }
    }

    // Another caller may already have renewed; only drop the session we used.
    async fn invalidate_if_current(&self, session_id: &str) {
        let mut state = self.state.lock().await;
        if state
            .active
            .as_ref()
            .is_some_and(|active| active.session.session_id == session_id)
        {
            debug!(session_id, "Dropping session after transport failure");
            state.active = None;
        }
    }
}

fn mode_label(mode: EndpointMode) -> &'static str {
    if mode.is_secure() { "https" } else { "http" }
}
