//! Cleanup worker (C10)
//!
//! Periodically retires submitted-magnet records past their retention
//! window: deletes each from the debrid service, then removes the row
//! regardless of upstream outcome (best-effort cleanup).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::repositories::MagnetRepository;
use crate::interfaces::external_services::DebridClient;

const DELETE_SPACER: Duration = Duration::from_millis(100);

pub struct CleanupWorker {
    magnets: Arc<dyn MagnetRepository>,
    debrid: Arc<dyn DebridClient>,
    retention: chrono::Duration,
}

impl CleanupWorker {
    pub fn new(magnets: Arc<dyn MagnetRepository>, debrid: Arc<dyn DebridClient>, retention_secs: u64) -> Self {
        Self {
            magnets,
            debrid,
            retention: chrono::Duration::seconds(retention_secs as i64),
        }
    }

    /// Runs one sweep: find records older than `retention`, group by owning
    /// API key, and delete each sequentially with a spacer between calls.
    pub async fn run_once(&self) {
        let cutoff = Utc::now() - self.retention;
        let records = match self.magnets.find_older_than(cutoff).await {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "cleanup worker failed to list expired magnets");
                return;
            }
        };

        if records.is_empty() {
            return;
        }

        let mut groups: HashMap<String, Vec<_>> = HashMap::new();
        for record in records {
            groups.entry(record.api_key.clone()).or_default().push(record);
        }

        for (api_key, group) in groups {
            for (i, record) in group.iter().enumerate() {
                if i > 0 {
                    tokio::time::sleep(DELETE_SPACER).await;
                }
                if let Err(err) = self.debrid.delete(&record.debrid_id, &api_key).await {
                    warn!(debrid_id = %record.debrid_id, %err, "debrid delete failed during cleanup");
                }
                if let Err(err) = self.magnets.delete(&record.debrid_id).await {
                    warn!(debrid_id = %record.debrid_id, %err, "failed to remove expired magnet record");
                }
            }
        }
    }

    /// Runs `run_once` on a fixed interval until the process exits.
    pub async fn run_forever(self: Arc<Self>, interval_secs: u64) {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            ticker.tick().await;
            info!("running cleanup sweep");
            self.run_once().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MagnetRecord;
    use crate::shared::error::{DebridError, RepositoryError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeMagnetRepository {
        records: Mutex<Vec<MagnetRecord>>,
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MagnetRepository for FakeMagnetRepository {
        async fn put(&self, record: &MagnetRecord) -> Result<(), RepositoryError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn find_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<MagnetRecord>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.submitted_at < cutoff)
                .cloned()
                .collect())
        }

        async fn delete(&self, debrid_id: &str) -> Result<(), RepositoryError> {
            self.deleted.lock().unwrap().push(debrid_id.to_string());
            self.records.lock().unwrap().retain(|r| r.debrid_id != debrid_id);
            Ok(())
        }
    }

    struct FakeDebridClient {
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DebridClient for FakeDebridClient {
        async fn submit(&self, _infohash: &str, _label: &str, _api_key: &str) -> Result<String, DebridError> {
            unimplemented!("cleanup worker never submits")
        }

        async fn poll(&self, _infohashes: &[String], _api_key: &str) -> Result<Vec<crate::domain::entities::PollResult>, DebridError> {
            unimplemented!("cleanup worker never polls")
        }

        async fn unlock(&self, _opaque_file_url: &str, _api_key: &str) -> Result<String, DebridError> {
            unimplemented!("cleanup worker never unlocks")
        }

        async fn delete(&self, debrid_id: &str, _api_key: &str) -> Result<(), DebridError> {
            self.deleted.lock().unwrap().push(debrid_id.to_string());
            Ok(())
        }
    }

    fn record(debrid_id: &str, api_key: &str, submitted_at: DateTime<Utc>) -> MagnetRecord {
        MagnetRecord {
            debrid_id: debrid_id.to_string(),
            infohash: format!("hash-{debrid_id}"),
            api_key_fingerprint: format!("fp-{api_key}"),
            api_key: api_key.to_string(),
            label: "label".to_string(),
            submitted_at,
        }
    }

    #[tokio::test]
    async fn sweeps_only_records_past_retention_and_deletes_from_both_sides() {
        let now = Utc::now();
        let magnets = Arc::new(FakeMagnetRepository {
            records: Mutex::new(vec![
                record("old", "key-a", now - chrono::Duration::seconds(600)),
                record("fresh", "key-a", now),
            ]),
            deleted: Mutex::new(Vec::new()),
        });
        let debrid = Arc::new(FakeDebridClient { deleted: Mutex::new(Vec::new()) });

        let worker = CleanupWorker::new(magnets.clone(), debrid.clone(), 300);
        worker.run_once().await;

        assert_eq!(debrid.deleted.lock().unwrap().as_slice(), ["old"]);
        assert_eq!(magnets.deleted.lock().unwrap().as_slice(), ["old"]);
        assert_eq!(magnets.records.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn does_nothing_when_nothing_is_past_retention() {
        let now = Utc::now();
        let magnets = Arc::new(FakeMagnetRepository {
            records: Mutex::new(vec![record("fresh", "key-a", now)]),
            deleted: Mutex::new(Vec::new()),
        });
        let debrid = Arc::new(FakeDebridClient { deleted: Mutex::new(Vec::new()) });

        let worker = CleanupWorker::new(magnets.clone(), debrid.clone(), 300);
        worker.run_once().await;

        assert!(debrid.deleted.lock().unwrap().is_empty());
        assert_eq!(magnets.records.lock().unwrap().len(), 1);
    }
}
