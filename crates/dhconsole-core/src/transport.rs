//! Wire-level contract between the session layer and the MUIP HTTP endpoints.
//!
//! `MuipTransport` is a thin, unpaced, session-unaware client: one method per
//! endpoint, returning the raw JSON envelope. Pacing, session renewal,
//! encryption and envelope decoding are layered on top of it in
//! `dhconsole-interaction`.

use crate::error::{ConsoleError, Result};
use crate::model::{PlayerInformation, ServerInformation};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which of the two candidate base URLs a call goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointMode {
    Secure,
    Insecure,
}

impl EndpointMode {
    pub fn from_ssl(ssl: bool) -> Self {
        if ssl { Self::Secure } else { Self::Insecure }
    }

    pub fn is_secure(self) -> bool {
        matches!(self, Self::Secure)
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Secure => Self::Insecure,
            Self::Insecure => Self::Secure,
        }
    }
}

/// The `{code, message, data}` envelope every endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    // A missing `data` key deserializes to None.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 0,
            message: None,
            data: Some(data),
        }
    }

    pub fn rejected(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Unwraps `data`, turning a non-zero code into `ConsoleError::Protocol`.
    pub fn into_data(self) -> Result<T> {
        if self.code != 0 {
            return Err(ConsoleError::protocol(
                self.code,
                self.message.unwrap_or_else(|| "no message".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ConsoleError::protocol(self.code, "response carried no data"))
    }

    /// Checks the code only; for endpoints whose `data` is irrelevant.
    pub fn into_unit(self) -> Result<()> {
        if self.code != 0 {
            return Err(ConsoleError::protocol(
                self.code,
                self.message.unwrap_or_else(|| "no message".to_string()),
            ));
        }
        Ok(())
    }
}

/// `data` of `create_session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
    pub session_id: String,
    /// Unix timestamp, seconds or milliseconds depending on server build.
    pub expire_time_stamp: i64,
    pub rsa_public_key: String,
}

/// `data` of `exec_cmd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecData {
    #[serde(default)]
    pub session_id: Option<String>,
    /// Base64 of the UTF-8 command output.
    #[serde(default)]
    pub message: String,
}

#[async_trait]
pub trait MuipTransport: Send + Sync {
    async fn create_session(
        &self,
        mode: EndpointMode,
        key_type: &str,
    ) -> Result<ApiResponse<SessionGrant>>;

    async fn authorize_admin(
        &self,
        mode: EndpointMode,
        session_id: &str,
        encrypted_admin_key: &str,
    ) -> Result<ApiResponse<serde_json::Value>>;

    async fn execute_command(
        &self,
        mode: EndpointMode,
        session_id: &str,
        encrypted_command: &str,
        target_uid: u32,
    ) -> Result<ApiResponse<ExecData>>;

    async fn server_information(
        &self,
        mode: EndpointMode,
        session_id: &str,
    ) -> Result<ApiResponse<ServerInformation>>;

    async fn player_information(
        &self,
        mode: EndpointMode,
        session_id: &str,
        uid: u32,
    ) -> Result<ApiResponse<PlayerInformation>>;
}

/// Runs one command string and returns the decoded response text.
///
/// Implemented by the command codec; the domain facade depends only on this.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &str) -> Result<String>;
}

/// The two structured queries that bypass the command channel.
#[async_trait]
pub trait ServerQuery: Send + Sync {
    async fn server_information(&self) -> Result<ServerInformation>;

    async fn player_information(&self, uid: u32) -> Result<PlayerInformation>;
}
