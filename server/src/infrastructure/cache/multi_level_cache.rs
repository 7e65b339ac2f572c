//! Multi-Level Cache Implementation
//!
//! Combines the in-memory L1 with a durable L2: check A, then B, then
//! populate A on a B hit.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::repositories::{CacheRepository, CacheStats};
use crate::infrastructure::cache::InMemoryCache;
use crate::shared::error::RepositoryError;
use chrono::{DateTime, Utc};
use tracing::warn;

/// Two-tier cache: L1 in-memory LRU, L2 any durable [`CacheRepository`].
pub struct MultiLevelCache {
    l1: Arc<InMemoryCache>,
    l2: Arc<dyn CacheRepository>,
    l1_ttl_secs: u64,
}

impl MultiLevelCache {
    pub fn new(l1: Arc<InMemoryCache>, l2: Arc<dyn CacheRepository>, l1_ttl_secs: u64) -> Self {
        Self {
            l1,
            l2,
            l1_ttl_secs,
        }
    }
}

#[async_trait]
impl CacheRepository for MultiLevelCache {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        if let Some(value) = self.l1.get(key) {
            return Ok(Some(value));
        }

        match self.l2.get(key).await {
            Ok(Some(value)) => {
                self.l1.put(key, &value, self.l1_ttl_secs);
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                warn!(key, %err, "L2 cache read failed, treating as miss");
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), RepositoryError> {
        self.l1.put(key, value, ttl_secs.min(self.l1_ttl_secs));

        if let Err(err) = self.l2.put(key, value, ttl_secs).await {
            warn!(key, %err, "L2 cache write failed");
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.l1.delete(key);
        if let Err(err) = self.l2.delete(key).await {
            warn!(key, %err, "L2 cache delete failed");
        }
        Ok(())
    }

    async fn find_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<String>, RepositoryError> {
        self.l2.find_older_than(cutoff).await
    }

    async fn get_stats(&self) -> Result<CacheStats, RepositoryError> {
        let l2_stats = self.l2.get_stats().await.unwrap_or_default();
        Ok(CacheStats {
            total_entries: self.l1.len() as i64 + l2_stats.total_entries,
            expired_entries: l2_stats.expired_entries,
        })
    }
}
