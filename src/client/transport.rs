//! Transport Module
//!
//! One HTTP GET per call. Retries live in the fetch client, not here.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use thiserror::Error;

// == Raw Response ==
/// Status line and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    /// Body text, None if it could not be read
    pub body: Option<String>,
}

impl RawResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: Option<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// == Transport Error ==
/// The exchange did not produce a response: connect, DNS or timeout failure.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub timed_out: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display omits the underlying cause
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self {
            message,
            timed_out: err.is_timeout(),
        }
    }
}

// == Transport Trait ==
/// Performs a single GET with a deadline.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<RawResponse, TransportError>;
}

// == Reqwest Transport ==
/// Production transport over a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing client, e.g. one with custom TLS or proxy settings.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, concat!("ccstatus/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown Status");

        if status.is_success() {
            // A body cut short is a transport failure, not a decode one
            let body = response.text().await?;
            Ok(RawResponse::new(status.as_u16(), status_text, Some(body)))
        } else {
            let body = response.text().await.ok().filter(|b| !b.trim().is_empty());
            Ok(RawResponse::new(status.as_u16(), status_text, body))
        }
    }
}
