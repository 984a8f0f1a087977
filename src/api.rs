use crate::config::get_config;
use crate::errors::{SidechatError, SidechatResult};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Why a send did not produce a reply. The kind is kept for logging only;
/// before anything reaches the transcript every variant collapses to the
/// fixed fallback message.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(StatusCode),

    #[error("backend response missing or malformed `response` field")]
    Malformed,
}

/// HTTP client for the chat endpoint.
///
/// Wire contract: `POST <endpoint>` with body `{"message": "<text>"}`,
/// success is a JSON body whose `response` field holds the reply text.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    endpoint: String,
}

impl ChatClient {
    /// Builds a client against `endpoint` with a hard per-request timeout,
    /// so a call that never settles cannot leave a send pending forever.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> SidechatResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SidechatError::api_error(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Builds a client from the global config.
    pub fn from_config() -> SidechatResult<Self> {
        let config = get_config();
        Self::new(
            config.endpoint,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one user message and returns the backend's reply, trimmed.
    pub async fn send_message(&self, text: &str) -> Result<String, DeliveryError> {
        let payload = json!({ "message": text });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status(status));
        }

        let body: Value = response.json().await.map_err(|_| DeliveryError::Malformed)?;
        let reply = body["response"].as_str().ok_or(DeliveryError::Malformed)?;

        Ok(reply.trim().to_string())
    }
}
