//! CommandService - the command codec.
//!
//! Sends command text through the session manager on behalf of the current
//! target player and returns the decoded response text.

use crate::audit::AUDIT_TARGET;
use async_trait::async_trait;
use dhconsole_core::model::{PlayerInformation, ServerInformation};
use dhconsole_core::{CommandExecutor, MuipTransport, Result, ServerQuery};
use dhconsole_interaction::SessionManager;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{info, warn};

pub struct CommandService<T: MuipTransport> {
    sessions: Arc<SessionManager<T>>,
    target_uid: AtomicU32,
}

impl<T: MuipTransport> CommandService<T> {
    pub fn new(sessions: Arc<SessionManager<T>>, target_uid: u32) -> Self {
        Self {
            sessions,
            target_uid: AtomicU32::new(target_uid),
        }
    }

    /// Player uid subsequent commands act on.
    pub fn target_uid(&self) -> u32 {
        self.target_uid.load(Ordering::SeqCst)
    }

    pub fn set_target_uid(&self, uid: u32) {
        self.target_uid.store(uid, Ordering::SeqCst);
    }

    pub fn sessions(&self) -> &Arc<SessionManager<T>> {
        &self.sessions
    }
}

#[async_trait]
impl<T: MuipTransport> CommandExecutor for CommandService<T> {
    async fn execute(&self, command: &str) -> Result<String> {
        let target_uid = self.target_uid();
        info!(target: AUDIT_TARGET, command, target_uid, "Dispatching command");

        match self.sessions.execute_command(command, target_uid).await {
            Ok(output) => Ok(output),
            Err(err) => {
                warn!(target: AUDIT_TARGET, command, target_uid, error = %err, "Command failed");
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<T: MuipTransport> ServerQuery for CommandService<T> {
    async fn server_information(&self) -> Result<ServerInformation> {
        self.sessions.server_information().await
    }

    async fn player_information(&self, uid: u32) -> Result<PlayerInformation> {
        self.sessions.player_information(uid).await
    }
}
