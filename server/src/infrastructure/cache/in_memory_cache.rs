//! In-Memory Cache Implementation (Layer A)
//!
//! Process-memory LRU with per-entry TTL, backed by the `lru` crate for
//! genuine move-to-front eviction.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use chrono::Utc;
use lru::LruCache;

struct Entry {
    value: String,
    expires_at: i64,
}

/// Layer A of the two-tier cache: capacity-bounded, TTL-expiring,
/// move-to-front on read.
pub struct InMemoryCache {
    entries: Mutex<LruCache<String, Entry>>,
}

impl InMemoryCache {
    /// `capacity` bounds entry count; eviction on write-past-capacity
    /// drops the least-recently-used entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1000).unwrap());
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Gets a value if present and unexpired; a hit moves the entry to
    /// the front.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        let now = Utc::now().timestamp();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    /// Inserts a value with a TTL in seconds from now.
    pub fn put(&self, key: &str, value: &str, ttl_secs: u64) {
        let mut entries = self.entries.lock().unwrap();
        entries.put(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Utc::now().timestamp() + ttl_secs as i64,
            },
        );
    }

    pub fn delete(&self, key: &str) {
        self.entries.lock().unwrap().pop(key);
    }

    /// Drops every expired entry; run by the hourly background sweep.
    pub fn sweep_expired(&self) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let now = Utc::now().timestamp();
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, e)| e.expires_at <= now)
            .map(|(k, _)| k.clone())
            .collect();
        let removed = expired.len();
        for key in expired {
            entries.pop(&key);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let cache = InMemoryCache::new(10);
        cache.put("k", "v", 60);
        assert_eq!(cache.get("k"), Some("v".to_string()));
    }

    #[test]
    fn expired_entry_is_not_returned() {
        let cache = InMemoryCache::new(10);
        cache.put("k", "v", 0);
        std::thread::sleep(std::time::Duration::from_millis(1100));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let cache = InMemoryCache::new(1);
        cache.put("a", "1", 60);
        cache.put("b", "2", 60);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some("2".to_string()));
    }
}
