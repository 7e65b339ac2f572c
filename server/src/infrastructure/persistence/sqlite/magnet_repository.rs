//! SQLite implementation of [`MagnetRepository`].

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::{Pool, Row, Sqlite};

use crate::domain::repositories::{MagnetRecord, MagnetRepository};
use crate::shared::error::RepositoryError;

pub struct SqliteMagnetRepository {
    pool: Pool<Sqlite>,
}

impl SqliteMagnetRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MagnetRepository for SqliteMagnetRepository {
    async fn put(&self, record: &MagnetRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO submitted_magnets (debrid_id, infohash, api_key_fingerprint, api_key, label)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(debrid_id) DO UPDATE SET
                api_key_fingerprint = excluded.api_key_fingerprint,
                api_key = excluded.api_key,
                label = excluded.label
            "#,
        )
        .bind(&record.debrid_id)
        .bind(&record.infohash)
        .bind(&record.api_key_fingerprint)
        .bind(&record.api_key)
        .bind(&record.label)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<MagnetRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT debrid_id, infohash, api_key_fingerprint, api_key, label, submitted_at \
             FROM submitted_magnets WHERE submitted_at < ?",
        )
        .bind(cutoff.timestamp())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let submitted_at: i64 = row.try_get("submitted_at")?;
                Ok(MagnetRecord {
                    debrid_id: row.try_get("debrid_id")?,
                    infohash: row.try_get("infohash")?,
                    api_key_fingerprint: row.try_get("api_key_fingerprint")?,
                    api_key: row.try_get("api_key")?,
                    label: row.try_get("label")?,
                    submitted_at: Utc.timestamp_opt(submitted_at, 0).single().unwrap_or_else(Utc::now),
                })
            })
            .collect()
    }

    async fn delete(&self, debrid_id: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM submitted_magnets WHERE debrid_id = ?")
            .bind(debrid_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
