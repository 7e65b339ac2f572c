//! SQLite Cache Repository Implementation
//!
//! Durable (Layer B) key/value store backing the two-tier cache.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite};

use crate::domain::repositories::{CacheRepository, CacheStats};
use crate::shared::error::RepositoryError;

/// SQLite implementation of [`CacheRepository`].
pub struct SqliteCacheRepository {
    pool: Pool<Sqlite>,
}

impl SqliteCacheRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn is_expired(expires_at: i64) -> bool {
        Utc::now().timestamp() > expires_at
    }
}

#[async_trait]
impl CacheRepository for SqliteCacheRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let result = sqlx::query("SELECT value, expires_at FROM cache WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match result {
            Some(row) => {
                let expires_at: i64 = row.try_get("expires_at")?;
                if Self::is_expired(expires_at) {
                    sqlx::query("DELETE FROM cache WHERE key = ?")
                        .bind(key)
                        .execute(&self.pool)
                        .await?;
                    Ok(None)
                } else {
                    Ok(Some(row.try_get("value")?))
                }
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), RepositoryError> {
        let expires_at = Utc::now().timestamp() + ttl_secs as i64;

        sqlx::query("INSERT OR REPLACE INTO cache (key, value, expires_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cache WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT key FROM cache WHERE created_at < ? ORDER BY key ASC")
            .bind(cutoff.timestamp())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .filter_map(|row| row.try_get("key").ok())
            .collect())
    }

    async fn get_stats(&self) -> Result<CacheStats, RepositoryError> {
        let now = Utc::now().timestamp();

        let total_result = sqlx::query("SELECT COUNT(*) as count FROM cache")
            .fetch_one(&self.pool)
            .await?;
        let expired_result = sqlx::query("SELECT COUNT(*) as count FROM cache WHERE expires_at < ?")
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(CacheStats {
            total_entries: total_result.try_get("count")?,
            expired_entries: expired_result.try_get("count")?,
        })
    }
}
