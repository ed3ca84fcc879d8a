//! Error types for the status client
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

// == Fetch Error Enum ==
/// Terminal failure of a remote read, after any retries.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure or timeout on every attempt
    #[error("network error after {attempts} attempt(s) for {url}: {message}")]
    Network {
        url: String,
        attempts: u32,
        timed_out: bool,
        message: String,
    },

    /// Non-success response
    #[error(
        "HTTP {status}: {status_text}{}",
        .body.as_deref().map(|b| format!(" - {}", b)).unwrap_or_default()
    )]
    Http {
        url: String,
        status: u16,
        status_text: String,
        body: Option<String>,
        attempts: u32,
    },

    /// Response body did not match the expected payload
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// Whether another attempt could have succeeded had the budget allowed it.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network { .. } => true,
            FetchError::Http { status, .. } => is_retryable_status(*status),
            FetchError::Decode { .. } => false,
        }
    }

    /// Number of attempts made before giving up.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            FetchError::Network { attempts, .. } | FetchError::Http { attempts, .. } => {
                Some(*attempts)
            }
            FetchError::Decode { .. } => None,
        }
    }

    /// HTTP status code, if the failure was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 429 and every 5xx are worth another attempt.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || status >= 500
}

// == Config Error Enum ==
/// Invalid settings, fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more validation rules failed
    #[error("invalid configuration:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),

    /// Environment variable could not be parsed
    #[error("invalid value for {var}: {value:?}")]
    Env { var: String, value: String },

    /// Config file exists but could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected shape
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for fetch and data service operations.
pub type Result<T> = std::result::Result<T, FetchError>;
