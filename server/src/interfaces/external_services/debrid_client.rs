//! Debrid client interface (C8's port).

use async_trait::async_trait;

use crate::domain::entities::PollResult;
use crate::shared::error::DebridError;

/// Submit/poll/unlock/delete contract for a cloud debrid service.
#[async_trait]
pub trait DebridClient: Send + Sync {
    /// Submits an infohash for caching; returns the service's own id for
    /// the submission.
    async fn submit(
        &self,
        infohash: &str,
        label: &str,
        api_key: &str,
    ) -> Result<String, DebridError>;

    /// Polls readiness for a batch of infohashes in one call.
    async fn poll(&self, infohashes: &[String], api_key: &str) -> Result<Vec<PollResult>, DebridError>;

    /// Converts an opaque file reference into a time-limited direct URL.
    async fn unlock(&self, opaque_file_url: &str, api_key: &str) -> Result<String, DebridError>;

    /// Removes a submission from the debrid service.
    async fn delete(&self, debrid_id: &str, api_key: &str) -> Result<(), DebridError>;
}
