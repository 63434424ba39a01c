//! HTTP capability injected into the lookup controller.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use serde_json::Value;
use shared::error::LookupError;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("gitinfo/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Value,
}

/// Failures as classified by the transport layer. Anything that is not a 2xx
/// response with a JSON body ends up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("server answered {status} {status_text}")]
    Status { status: u16, status_text: String },
    #[error("request failed before a response arrived: {0}")]
    Network(String),
    #[error("response with status {status} has an unusable body: {reason}")]
    Malformed { status: u16, reason: String },
}

impl From<TransportError> for LookupError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Status {
                status,
                status_text,
            } => LookupError::Transport {
                status: i32::from(status),
                status_text,
            },
            TransportError::Network(_) => LookupError::network_failure(),
            TransportError::Malformed { status, .. } => LookupError::malformed_response(status),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one GET for `url` and decodes the body as JSON.
    async fn get_json(&self, url: Url) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Production transport over `reqwest`. No timeout is configured, so a stalled
/// request waits for whatever the connection itself reports.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get_json(&self, url: Url) -> Result<TransportResponse, TransportError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        debug!(status = status.as_u16(), "received lookup response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                status_text,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        let body = serde_json::from_slice::<Value>(&bytes).map_err(|err| {
            TransportError::Malformed {
                status: status.as_u16(),
                reason: err.to_string(),
            }
        })?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
