//! ccstatus - Status page client
//!
//! Fetches incidents and the status summary from a status API, with bounded
//! retries, a TTL/capacity-bounded cache and lazy streams over the results.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use config::Config;
pub use error::{ConfigError, FetchError, Result};
pub use service::{StatusService, StatusSource};
