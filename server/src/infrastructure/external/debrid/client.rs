//! Debrid client implementation (C8)
//!
//! Wraps C1's rate-limited HTTP caller with the submit/poll/unlock/delete
//! contract, and persists submission bookkeeping via [`MagnetRepository`]
//! the way `submit` is specified to.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::entities::{FileLink, PollResult, Readiness};
use crate::domain::repositories::{MagnetRecord, MagnetRepository};
use crate::infrastructure::external::debrid::dto::{PollEntry, SubmitResponse, UnlockResponse};
use crate::infrastructure::http::RateLimitedClient;
use crate::interfaces::external_services::DebridClient;
use crate::shared::error::DebridError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn fingerprint(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

fn validate_api_key(api_key: &str) -> Result<(), DebridError> {
    let looks_valid = api_key.len() >= 16 && api_key.chars().all(|c| c.is_ascii_alphanumeric());
    if looks_valid {
        Ok(())
    } else {
        Err(DebridError::InvalidAuth)
    }
}

fn map_readiness(status_code: i32) -> Readiness {
    match status_code {
        0 => Readiness::NotStarted,
        4 => Readiness::Ready,
        5 | 6 | 7 => Readiness::Error,
        1..=3 => Readiness::Downloading,
        _ => Readiness::Downloaded,
    }
}

pub struct RealDebridClient {
    base_url: String,
    http: Arc<RateLimitedClient>,
    magnets: Arc<dyn MagnetRepository>,
}

impl RealDebridClient {
    pub fn new(base_url: impl Into<String>, http: Arc<RateLimitedClient>, magnets: Arc<dyn MagnetRepository>) -> Self {
        Self {
            base_url: base_url.into(),
            http,
            magnets,
        }
    }

    fn authed_url(&self, path: &str, api_key: &str) -> String {
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}api_key={}", self.base_url, path, separator, api_key)
    }
}

#[async_trait]
impl DebridClient for RealDebridClient {
    async fn submit(&self, infohash: &str, label: &str, api_key: &str) -> Result<String, DebridError> {
        validate_api_key(api_key)?;

        let url = self.authed_url("/torrents/add", api_key);
        let form = [("infohash", infohash), ("label", label)];
        let bytes = self.http.post_form(&url, &form, REQUEST_TIMEOUT).await?;
        let response: SubmitResponse =
            serde_json::from_slice(&bytes).map_err(|_| DebridError::Upstream(crate::shared::error::HttpError::Network(
                "malformed submit response".to_string(),
            )))?;

        let record = MagnetRecord {
            debrid_id: response.id.clone(),
            infohash: infohash.to_string(),
            api_key_fingerprint: fingerprint(api_key),
            api_key: api_key.to_string(),
            label: label.to_string(),
            submitted_at: chrono::Utc::now(),
        };
        self.magnets.put(&record).await?;

        Ok(response.id)
    }

    async fn poll(&self, infohashes: &[String], api_key: &str) -> Result<Vec<PollResult>, DebridError> {
        validate_api_key(api_key)?;

        let joined = infohashes.join(",");
        let url = self.authed_url(&format!("/torrents/status?infohashes={joined}"), api_key);
        let bytes = self.http.get(&url, REQUEST_TIMEOUT).await?;
        let entries: Vec<PollEntry> =
            serde_json::from_slice(&bytes).map_err(|_| DebridError::Upstream(crate::shared::error::HttpError::Network(
                "malformed poll response".to_string(),
            )))?;

        Ok(entries
            .into_iter()
            .map(|entry| PollResult {
                infohash: entry.infohash,
                readiness: map_readiness(entry.status_code),
                size_bytes: entry.size_bytes,
                files: entry.files.map(|files| {
                    files
                        .into_iter()
                        .map(|f| FileLink {
                            path: f.path,
                            size_bytes: f.size_bytes,
                            link: f.link,
                        })
                        .collect()
                }),
            })
            .collect())
    }

    async fn unlock(&self, opaque_file_url: &str, api_key: &str) -> Result<String, DebridError> {
        validate_api_key(api_key)?;

        let url = self.authed_url("/unrestrict/link", api_key);
        let form = [("link", opaque_file_url)];
        let bytes = self.http.post_form(&url, &form, REQUEST_TIMEOUT).await?;
        let response: UnlockResponse =
            serde_json::from_slice(&bytes).map_err(|_| DebridError::Upstream(crate::shared::error::HttpError::Network(
                "malformed unlock response".to_string(),
            )))?;

        if response.direct_url.is_empty() {
            return Err(DebridError::Upstream(crate::shared::error::HttpError::Network(
                "empty direct url".to_string(),
            )));
        }

        Ok(response.direct_url)
    }

    async fn delete(&self, debrid_id: &str, api_key: &str) -> Result<(), DebridError> {
        validate_api_key(api_key)?;

        let url = self.authed_url(&format!("/torrents/delete/{debrid_id}"), api_key);
        self.http.post_form(&url, &[], REQUEST_TIMEOUT).await?;
        self.magnets.delete(debrid_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_not_the_key_itself() {
        let key = "abcdef0123456789abcdef0123456789";
        let a = fingerprint(key);
        let b = fingerprint(key);
        assert_eq!(a, b);
        assert_ne!(a, key);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn fingerprint_differs_for_different_keys() {
        assert_ne!(
            fingerprint("abcdef0123456789abcdef0123456789"),
            fingerprint("zzzzzz0123456789zzzzzz0123456789"),
        );
    }

    #[test]
    fn validate_api_key_rejects_short_or_non_alphanumeric() {
        assert!(validate_api_key("abcdef0123456789abcdef0123456789").is_ok());
        assert!(validate_api_key("tooshort").is_err());
        assert!(validate_api_key("not-alphanumeric-but-long-enough!!").is_err());
    }

    #[test]
    fn map_readiness_classifies_every_status_code() {
        assert_eq!(map_readiness(0), Readiness::NotStarted);
        assert_eq!(map_readiness(2), Readiness::Downloading);
        assert_eq!(map_readiness(4), Readiness::Ready);
        assert_eq!(map_readiness(6), Readiness::Error);
        assert_eq!(map_readiness(99), Readiness::Downloaded);
    }
}
