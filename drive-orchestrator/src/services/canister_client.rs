//! HTTP canister client
//!
//! Calls the drive method on the backend canister through an HTTP gateway.
//! The request is a JSON body `{"token": "..."}` POSTed to
//! `{host}/api/v1/canister/{canister_id}/call/{method}`; the gateway answers
//! with `{"ok": "<response>"}` or `{"err": "<message>"}`.

use serde::{Deserialize, Serialize};
use shared::{process_debug, ProcessId};

use crate::config::DriveConfig;
use crate::error::{DriveError, DriveResult};
use crate::traits::CanisterClient;

#[derive(Serialize)]
struct DriveRequest<'a> {
    token: &'a str,
}

/// Candid-style result variant as rendered by the gateway
#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum CanisterReply {
    Ok(String),
    Err(String),
}

/// Real canister client over HTTP
#[derive(Clone)]
pub struct HttpCanisterClient {
    http: reqwest::Client,
    call_url: String,
    credential: Option<String>,
}

impl HttpCanisterClient {
    /// Create a client from validated configuration
    pub fn new(config: &DriveConfig) -> DriveResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("drive-orchestrator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DriveError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            call_url: Self::call_url(config),
            credential: config.credential.clone(),
        })
    }

    fn call_url(config: &DriveConfig) -> String {
        format!(
            "{}/api/v1/canister/{}/call/{}",
            config.host.trim_end_matches('/'),
            config.canister_id,
            config.method
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.call_url
    }
}

#[async_trait::async_trait]
impl CanisterClient for HttpCanisterClient {
    async fn gacha_drive(&self, token: &str) -> DriveResult<String> {
        process_debug!(ProcessId::current(), "📡 POST {}", self.call_url);

        let mut request = self.http.post(&self.call_url).json(&DriveRequest { token });
        if let Some(credential) = &self.credential {
            request = request.bearer_auth(credential);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DriveError::network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DriveError::network(format!("Failed to read response body: {e}")))?;

        // An explicit `err` body wins over the status so the canister's own message surfaces.
        match (status.is_success(), serde_json::from_str::<CanisterReply>(&body)) {
            (_, Ok(CanisterReply::Err(message))) => Err(DriveError::remote(message)),
            (true, Ok(CanisterReply::Ok(value))) => Ok(value),
            (true, Err(e)) => Err(DriveError::remote(format!("Malformed canister reply: {e}"))),
            (false, _) => Err(DriveError::remote(format!("Canister call failed with status: {status}"))),
        }
    }
}
