//! CacheRepository trait
//!
//! Durable (Layer B) key/value contract backing the two-tier cache.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository for the durable cache tier.
#[async_trait]
pub trait CacheRepository: Send + Sync {
    /// Gets a value from cache, `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, crate::shared::error::RepositoryError>;

    /// Stores a value with TTL (seconds from now).
    async fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), crate::shared::error::RepositoryError>;

    /// Removes a value from cache.
    async fn delete(&self, key: &str) -> Result<(), crate::shared::error::RepositoryError>;

    /// Returns keys whose entries were written before `cutoff`, for the
    /// periodic cleanup worker (C10) to prune stale records.
    async fn find_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<String>, crate::shared::error::RepositoryError>;

    /// Gets cache statistics.
    async fn get_stats(&self) -> Result<CacheStats, crate::shared::error::RepositoryError>;
}

/// Cache statistics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub total_entries: i64,
    pub expired_entries: i64,
}
