//! Integration tests for the SQLite-backed cache and magnet repositories
//! against a real (in-memory) SQLite database.

use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use streamd::domain::repositories::{CacheRepository, MagnetRecord, MagnetRepository};
use streamd::infrastructure::database::initialize_schema;
use streamd::infrastructure::persistence::sqlite::{SqliteCacheRepository, SqliteMagnetRepository};

async fn test_pool() -> sqlx::Pool<sqlx::Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite pool");
    initialize_schema(&pool).await.expect("schema init failed");
    pool
}

#[tokio::test]
async fn cache_repository_roundtrips_a_value() {
    let pool = test_pool().await;
    let repo = SqliteCacheRepository::new(pool);

    assert_eq!(repo.get("search:general:matrix:Movie::").await.unwrap(), None);

    repo.put("search:general:matrix:Movie::", "{\"movie\":[]}", 3600).await.unwrap();
    let value = repo.get("search:general:matrix:Movie::").await.unwrap();
    assert_eq!(value.as_deref(), Some("{\"movie\":[]}"));
}

#[tokio::test]
async fn cache_repository_treats_expired_entries_as_absent() {
    let pool = test_pool().await;
    let repo = SqliteCacheRepository::new(pool);

    repo.put("hash:general:abc", "deadbeef", 0).await.unwrap();
    // ttl_secs = 0 means expires_at == now; a moment later it's already expired.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    assert_eq!(repo.get("hash:general:abc").await.unwrap(), None);
}

#[tokio::test]
async fn cache_repository_delete_removes_the_entry() {
    let pool = test_pool().await;
    let repo = SqliteCacheRepository::new(pool);

    repo.put("k", "v", 3600).await.unwrap();
    repo.delete("k").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn magnet_repository_put_then_find_older_than() {
    let pool = test_pool().await;
    let repo = SqliteMagnetRepository::new(pool);

    let record = MagnetRecord {
        debrid_id: "debrid-1".to_string(),
        infohash: "infohash-1".to_string(),
        api_key_fingerprint: "fp-1".to_string(),
        api_key: "raw-key-1".to_string(),
        label: "Movie.2020.1080p".to_string(),
        submitted_at: Utc::now(),
    };
    repo.put(&record).await.unwrap();

    let cutoff_in_future = Utc::now() + chrono::Duration::seconds(1);
    let found = repo.find_older_than(cutoff_in_future).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].debrid_id, "debrid-1");
    assert_eq!(found[0].api_key, "raw-key-1");

    let cutoff_in_past = Utc::now() - chrono::Duration::seconds(3600);
    assert!(repo.find_older_than(cutoff_in_past).await.unwrap().is_empty());
}

#[tokio::test]
async fn magnet_repository_upsert_overwrites_on_conflict() {
    let pool = test_pool().await;
    let repo = SqliteMagnetRepository::new(pool);

    let mut record = MagnetRecord {
        debrid_id: "debrid-1".to_string(),
        infohash: "infohash-1".to_string(),
        api_key_fingerprint: "fp-1".to_string(),
        api_key: "raw-key-1".to_string(),
        label: "original-label".to_string(),
        submitted_at: Utc::now(),
    };
    repo.put(&record).await.unwrap();

    record.label = "updated-label".to_string();
    repo.put(&record).await.unwrap();

    let found = repo.find_older_than(Utc::now() + chrono::Duration::seconds(1)).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].label, "updated-label");
}

#[tokio::test]
async fn magnet_repository_delete_removes_the_record() {
    let pool = test_pool().await;
    let repo = SqliteMagnetRepository::new(pool);

    let record = MagnetRecord {
        debrid_id: "debrid-1".to_string(),
        infohash: "infohash-1".to_string(),
        api_key_fingerprint: "fp-1".to_string(),
        api_key: "raw-key-1".to_string(),
        label: "label".to_string(),
        submitted_at: Utc::now(),
    };
    repo.put(&record).await.unwrap();
    repo.delete("debrid-1").await.unwrap();

    assert!(repo.find_older_than(Utc::now() + chrono::Duration::seconds(1)).await.unwrap().is_empty());
}
