//! Status Service Module
//!
//! Cache-aside access to the incident list and the status summary.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::resource::{
    shared_cache, Resource, SharedCache, INCIDENTS_KEY, SERVICE_STATUS_KEY, SERVICE_STATUS_TTL,
};
use super::source::StatusSource;
use crate::client::{
    FetchClient, ReqwestTransport, Transport, INCIDENTS_ENDPOINT, SUMMARY_ENDPOINT,
};
use crate::config::Config;
use crate::error::Result;
use crate::models::{Incident, IncidentsResponse, StatusSummary};

// == Status Service ==
/// Data service composing the fetch client and the cache.
///
/// Concurrent misses on the same key are not coalesced: each caller fetches
/// and the last store wins. Failed fetches are never cached.
pub struct StatusService<T = ReqwestTransport> {
    client: FetchClient<T>,
    cache: SharedCache,
    cache_enabled: bool,
}

impl StatusService<ReqwestTransport> {
    /// Wires a reqwest-backed client and a fresh cache from `config`.
    pub fn from_config(config: &Config) -> Self {
        let client = FetchClient::with_reqwest(config.api_base_url.clone(), config.retry_policy());
        Self::new(client, shared_cache(config.cache()))
            .with_cache_enabled(config.cache_enabled)
    }
}

impl<T: Transport> StatusService<T> {
    // == Constructor ==
    pub fn new(client: FetchClient<T>, cache: SharedCache) -> Self {
        Self {
            client,
            cache,
            cache_enabled: true,
        }
    }

    /// Turns the cache on or off. When off, every call fetches and nothing is stored.
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn client(&self) -> &FetchClient<T> {
        &self.client
    }

    async fn cached(&self, key: &str) -> Option<Resource> {
        if !self.cache_enabled {
            return None;
        }

        let hit = self.cache.write().await.get(key);
        match hit {
            Some(_) => debug!(key, "cache hit"),
            None => debug!(key, "cache miss"),
        }
        hit
    }

    async fn store(&self, key: &str, resource: Resource, ttl: Option<Duration>) {
        if self.cache_enabled {
            self.cache.write().await.set(key, resource, ttl);
        }
    }
}

#[async_trait]
impl<T: Transport> StatusSource for StatusService<T> {
    async fn incidents(&self) -> Result<Vec<Incident>> {
        if let Some(incidents) = self
            .cached(INCIDENTS_KEY)
            .await
            .and_then(Resource::into_incidents)
        {
            return Ok(incidents);
        }

        let response: IncidentsResponse = self.client.fetch(INCIDENTS_ENDPOINT).await?;
        let incidents = response.incidents;

        self.store(INCIDENTS_KEY, Resource::Incidents(incidents.clone()), None)
            .await;
        info!(count = incidents.len(), "fetched incidents");

        Ok(incidents)
    }

    async fn service_status(&self) -> Result<StatusSummary> {
        if let Some(summary) = self
            .cached(SERVICE_STATUS_KEY)
            .await
            .and_then(Resource::into_summary)
        {
            return Ok(summary);
        }

        let summary: StatusSummary = self.client.fetch(SUMMARY_ENDPOINT).await?;

        self.store(
            SERVICE_STATUS_KEY,
            Resource::Summary(summary.clone()),
            Some(SERVICE_STATUS_TTL),
        )
        .await;
        info!(
            components = summary.components.len(),
            incidents = summary.incidents.len(),
            ttl_secs = SERVICE_STATUS_TTL.as_secs(),
            "fetched service status"
        );

        Ok(summary)
    }
}
