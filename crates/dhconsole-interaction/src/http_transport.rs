//! HttpMuipTransport - `reqwest` implementation of the MUIP endpoints.

use async_trait::async_trait;
use dhconsole_core::config::MuipConfig;
use dhconsole_core::model::{PlayerInformation, ServerInformation};
use dhconsole_core::transport::{ApiResponse, ExecData, SessionGrant};
use dhconsole_core::{ConsoleError, EndpointMode, MuipTransport, Result};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Talks to both candidate base URLs; the caller picks one per request.
#[derive(Clone)]
pub struct HttpMuipTransport {
    client: Client,
    secure_base: String,
    insecure_base: String,
}

impl HttpMuipTransport {
    pub fn new(config: &MuipConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|err| ConsoleError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            secure_base: config.base_url(true),
            insecure_base: config.base_url(false),
        })
    }

    fn url(&self, mode: EndpointMode, route: &str) -> String {
        let base = if mode.is_secure() {
            &self.secure_base
        } else {
            &self.insecure_base
        };
        format!("{base}/{route}")
    }

    async fn post<B, T>(&self, mode: EndpointMode, route: &str, body: &B) -> Result<ApiResponse<T>>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(mode, route);
        debug!(%url, "POST");
        self.send(self.client.post(url).json(body)).await
    }

    async fn get<T>(
        &self,
        mode: EndpointMode,
        route: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.url(mode, route);
        debug!(%url, "GET");
        self.send(self.client.get(url).query(query)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>> {
        let response = request.send().await.map_err(|err| ConsoleError::Transport {
            message: format!("MUIP request failed: {err}"),
            status_code: err.status().map(|status| status.as_u16()),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(ConsoleError::Transport {
                message: format!("MUIP endpoint returned {status}: {body_text}"),
                status_code: Some(status.as_u16()),
            });
        }

        response.json().await.map_err(|err| ConsoleError::Transport {
            message: format!("Failed to parse MUIP response: {err}"),
            status_code: Some(status.as_u16()),
        })
    }
}

#[derive(Serialize)]
struct CreateSessionRequest<'a> {
    key_type: &'a str,
}

#[derive(Serialize)]
struct AuthAdminRequest<'a> {
    session_id: &'a str,
    admin_key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExecCommandRequest<'a> {
    session_id: &'a str,
    command: &'a str,
    target_uid: u32,
}

#[async_trait]
impl MuipTransport for HttpMuipTransport {
    async fn create_session(
        &self,
        mode: EndpointMode,
        key_type: &str,
    ) -> Result<ApiResponse<SessionGrant>> {
        self.post(mode, "create_session", &CreateSessionRequest { key_type })
            .await
    }

    async fn authorize_admin(
        &self,
        mode: EndpointMode,
        session_id: &str,
        encrypted_admin_key: &str,
    ) -> Result<ApiResponse<serde_json::Value>> {
        self.post(
            mode,
            "auth_admin",
            &AuthAdminRequest {
                session_id,
                admin_key: encrypted_admin_key,
            },
        )
        .await
    }

    async fn execute_command(
        &self,
        mode: EndpointMode,
        session_id: &str,
        encrypted_command: &str,
        target_uid: u32,
    ) -> Result<ApiResponse<ExecData>> {
        self.post(
            mode,
            "exec_cmd",
            &ExecCommandRequest {
                session_id,
                command: encrypted_command,
                target_uid,
            },
        )
        .await
    }

    async fn server_information(
        &self,
        mode: EndpointMode,
        session_id: &str,
    ) -> Result<ApiResponse<ServerInformation>> {
        self.get(
            mode,
            "server_information",
            &[("SessionId", session_id.to_string())],
        )
        .await
    }

    async fn player_information(
        &self,
        mode: EndpointMode,
        session_id: &str,
        uid: u32,
    ) -> Result<ApiResponse<PlayerInformation>> {
        self.get(
            mode,
            "player_information",
            &[("SessionId", session_id.to_string()), ("Uid", uid.to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_per_mode() {
        let config = MuipConfig {
            host: "10.0.0.5".into(),
            port: 21000,
            ..MuipConfig::default()
        };
        let transport = HttpMuipTransport::new(&config).unwrap();

        assert_eq!(
            transport.url(EndpointMode::Insecure, "exec_cmd"),
            "http://10.0.0.5:21000/muip/exec_cmd"
        );
        assert_eq!(
            transport.url(EndpointMode::Secure, "create_session"),
            "https://10.0.0.5:21000/muip/create_session"
        );
    }

    #[test]
    fn test_exec_request_field_names() {
        let body = serde_json::to_value(ExecCommandRequest {
            session_id: "s1",
            command: "enc",
            target_uid: 10001,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"SessionId": "s1", "Command": "enc", "TargetUid": 10001})
        );
    }

    #[test]
    fn test_auth_request_field_names() {
        let body = serde_json::to_value(AuthAdminRequest {
            session_id: "s1",
            admin_key: "enc",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"session_id": "s1", "admin_key": "enc"}));
    }
}
