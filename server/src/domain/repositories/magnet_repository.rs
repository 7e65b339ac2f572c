//! MagnetRepository trait
//!
//! Durable record of every magnet submitted to the debrid service, keyed by
//! `debrid_id` with a secondary-unique `infohash`. Backs both the debrid
//! client's bookkeeping and the cleanup worker's sweep.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::shared::error::RepositoryError;

/// One row of the `submitted_magnets` table.
#[derive(Debug, Clone)]
pub struct MagnetRecord {
    pub debrid_id: String,
    pub infohash: String,
    pub api_key_fingerprint: String,
    pub api_key: String,
    pub label: String,
    pub submitted_at: DateTime<Utc>,
}

#[async_trait]
pub trait MagnetRepository: Send + Sync {
    async fn put(&self, record: &MagnetRecord) -> Result<(), RepositoryError>;
    async fn find_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<MagnetRecord>, RepositoryError>;
    async fn delete(&self, debrid_id: &str) -> Result<(), RepositoryError>;
}
