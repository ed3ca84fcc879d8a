//! Fetch Client Module
//!
//! Reads one resource from the status API, retrying transient failures with
//! linear backoff and decoding the JSON body.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::policy::RetryPolicy;
use super::transport::{ReqwestTransport, Transport};
use crate::error::{is_retryable_status, FetchError, Result};

// == Fetch Client ==
/// Remote reader bound to a base URL and a retry policy.
///
/// Concurrent callers back off on the same schedule; there is no jitter.
#[derive(Debug, Clone)]
pub struct FetchClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    policy: RetryPolicy,
}

impl FetchClient<ReqwestTransport> {
    /// Creates a client over a fresh reqwest transport.
    pub fn with_reqwest(base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self::new(ReqwestTransport::new(), base_url, policy)
    }
}

impl<T: Transport> FetchClient<T> {
    // == Constructor ==
    pub fn new(transport: T, base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // == URL ==
    /// Joins base URL and endpoint path with exactly one slash between them.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    // == Fetch ==
    /// GETs `path` and decodes the body as `R`.
    ///
    /// Transport failures, 429 and 5xx are retried while attempts remain,
    /// waiting `base_delay * attempt` between tries. Any other non-success
    /// status and every decode failure are terminal at once.
    pub async fn fetch<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned + Send,
    {
        let url = self.url_for(path);
        let mut attempt: u32 = 1;

        loop {
            debug!(%url, attempt, max_attempts = self.policy.max_attempts, "fetch attempt");

            let failure = match self.transport.get(&url, self.policy.timeout).await {
                Ok(response) if response.is_success() => {
                    return decode(&url, response.body.as_deref());
                }
                Ok(response) => {
                    let retryable = is_retryable_status(response.status);
                    let err = FetchError::Http {
                        url: url.clone(),
                        status: response.status,
                        status_text: response.status_text,
                        body: response.body,
                        attempts: attempt,
                    };
                    if !retryable {
                        warn!(%url, status = response.status, "fetch failed, not retryable");
                        return Err(err);
                    }
                    err
                }
                Err(transport_err) => FetchError::Network {
                    url: url.clone(),
                    attempts: attempt,
                    timed_out: transport_err.timed_out,
                    message: transport_err.message,
                },
            };

            if !self.policy.has_attempts_left(attempt) {
                warn!(%url, attempts = attempt, error = %failure, "fetch failed, retries exhausted");
                return Err(failure);
            }

            let delay = self.policy.delay_for(attempt);
            warn!(
                %url,
                attempt,
                delay_ms = crate::cache::duration_ms(delay),
                error = %failure,
                "fetch attempt failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

fn decode<R: DeserializeOwned>(url: &str, body: Option<&str>) -> Result<R> {
    serde_json::from_str(body.unwrap_or_default()).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
