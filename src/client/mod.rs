//! Client Module
//!
//! HTTP access to the status API: transport, retry policy and the fetch loop.

mod fetch;
mod policy;
mod transport;

#[cfg(test)]
pub(crate) mod scripted;

pub use fetch::FetchClient;
pub use policy::RetryPolicy;
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};

// == Endpoints ==
/// Incidents collection, wrapped in a page envelope
pub const INCIDENTS_ENDPOINT: &str = "incidents.json";

/// Full status summary
pub const SUMMARY_ENDPOINT: &str = "summary.json";
