//! Status Source Trait
//!
//! The operations the presentation layer consumes. Every implementation
//! offers both the bulk and the incremental forms.

use async_trait::async_trait;
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};

use crate::error::{FetchError, Result};
use crate::models::{Component, Incident, StatusSummary};

#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Full incident list, newest first.
    async fn incidents(&self) -> Result<Vec<Incident>>;

    /// Current status summary.
    async fn service_status(&self) -> Result<StatusSummary>;

    /// First `limit` incidents of an already resolved list, order kept.
    ///
    /// A limit of zero yields nothing; a limit past the end yields everything.
    fn incidents_with_limit(&self, incidents: &[Incident], limit: usize) -> Vec<Incident> {
        incidents.iter().take(limit).cloned().collect()
    }

    /// Incidents one at a time, at most `limit` of them (`None` or zero: all).
    ///
    /// Nothing is fetched until the stream is first polled; a failed fetch is
    /// yielded as the only item. Dropping the stream early costs nothing
    /// beyond the single fetch.
    fn incidents_stream(&self, limit: Option<usize>) -> BoxStream<'_, Result<Incident>> {
        let take = limit.filter(|&n| n > 0).unwrap_or(usize::MAX);

        stream::once(self.incidents())
            .flat_map(move |resolved| match resolved {
                Ok(incidents) => {
                    stream::iter(incidents.into_iter().take(take).map(Ok)).left_stream()
                }
                Err(err) => stream::once(future::ready(Err(err))).right_stream(),
            })
            .boxed()
    }

    /// Components of the summary in their original order.
    ///
    /// The summary is resolved once, on first poll. Each element is preceded
    /// by a yield to the scheduler so other tasks run between reads.
    fn components_lazy(&self) -> BoxStream<'_, Result<Component>> {
        stream::once(self.service_status())
            .flat_map(|resolved| match resolved {
                Ok(summary) => stream::iter(summary.components)
                    .then(|component| async move {
                        tokio::task::yield_now().await;
                        Ok::<_, FetchError>(component)
                    })
                    .left_stream(),
                Err(err) => stream::once(future::ready(Err(err))).right_stream(),
            })
            .boxed()
    }
}
