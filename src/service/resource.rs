//! Cached resource values and the shared cache handle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::Cache;
use crate::models::{Incident, StatusSummary};

/// Cache key of the incident list
pub const INCIDENTS_KEY: &str = "incidents";

/// Cache key of the status summary
pub const SERVICE_STATUS_KEY: &str = "service_status";

/// Summaries go stale faster than incident history.
pub const SERVICE_STATUS_TTL: Duration = Duration::from_secs(60);

/// A payload held in the cache. Never mutated once stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Incidents(Vec<Incident>),
    Summary(StatusSummary),
}

impl Resource {
    pub fn into_incidents(self) -> Option<Vec<Incident>> {
        match self {
            Resource::Incidents(incidents) => Some(incidents),
            Resource::Summary(_) => None,
        }
    }

    pub fn into_summary(self) -> Option<StatusSummary> {
        match self {
            Resource::Summary(summary) => Some(summary),
            Resource::Incidents(_) => None,
        }
    }
}

/// Cache shared between the data service and whoever built it.
///
/// Reads take the write lock too, since a lookup may purge an expired entry.
pub type SharedCache = Arc<RwLock<Cache<Resource>>>;

pub fn shared_cache(cache: Cache<Resource>) -> SharedCache {
    Arc::new(RwLock::new(cache))
}
