//! General-purpose torrent provider adapter (C5).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::entities::CandidateSet;
use crate::domain::repositories::CacheRepository;
use crate::infrastructure::external::providers::common::{
    build_query, classify_results, hash_cache_key, search_cache_key, SEARCH_CACHE_TTL_SECS,
};
use crate::infrastructure::external::providers::dto::{InfohashResponse, SearchResponse};
use crate::infrastructure::http::RateLimitedClient;
use crate::interfaces::external_services::ProviderAdapter;
use crate::shared::error::ProviderError;
use torrent_identifier::RequestKind;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub struct GeneralProviderAdapter {
    provider_id: String,
    base_url: String,
    http: Arc<RateLimitedClient>,
    cache: Arc<dyn CacheRepository>,
}

impl GeneralProviderAdapter {
    pub fn new(
        provider_id: impl Into<String>,
        base_url: impl Into<String>,
        http: Arc<RateLimitedClient>,
        cache: Arc<dyn CacheRepository>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            base_url: base_url.into(),
            http,
            cache,
        }
    }

    async fn run_search(
        &self,
        original_title: &str,
        query: &str,
        kind: RequestKind,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Result<CandidateSet, ProviderError> {
        let key = search_cache_key(&self.provider_id, original_title, kind, season, episode);
        if let Ok(Some(cached)) = self.cache.get(&key).await {
            if let Ok(set) = serde_json::from_str(&cached) {
                return Ok(set);
            }
        }

        let encoded = query.replace(' ', "+");
        let url = format!("{}/search?q={encoded}", self.base_url);
        let bytes = self.http.get(&url, REQUEST_TIMEOUT).await?;
        let response: SearchResponse =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode(e.to_string()))?;
        let set = classify_results(&self.provider_id, response.results, kind, season, episode);

        if let Ok(encoded) = serde_json::to_string(&set) {
            if let Err(err) = self.cache.put(&key, &encoded, SEARCH_CACHE_TTL_SECS).await {
                warn!(%err, "failed to cache search results");
            }
        }

        Ok(set)
    }
}

#[async_trait]
impl ProviderAdapter for GeneralProviderAdapter {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }

    async fn search(
        &self,
        query: &str,
        kind: RequestKind,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Result<CandidateSet, ProviderError> {
        let built = build_query(query, kind, season, episode);
        self.run_search(query, &built, kind, season, episode).await
    }

    async fn search_specific_episode(
        &self,
        query: &str,
        kind: RequestKind,
        season: u32,
        episode: u32,
    ) -> Result<CandidateSet, ProviderError> {
        let built = build_query(query, kind, Some(season), Some(episode.max(1)));
        self.run_search(query, &built, kind, Some(season), Some(episode)).await
    }

    async fn fetch_infohash(&self, provider_internal_id: &str) -> Result<String, ProviderError> {
        let key = hash_cache_key(&self.provider_id, provider_internal_id);
        if let Ok(Some(cached)) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let url = format!("{}/infohash/{provider_internal_id}", self.base_url);
        let bytes = self.http.get(&url, REQUEST_TIMEOUT).await?;
        let response: InfohashResponse =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode(e.to_string()))?;

        if let Err(err) = self.cache.put(&key, &response.infohash, SEARCH_CACHE_TTL_SECS).await {
            warn!(%err, "failed to cache resolved infohash");
        }

        Ok(response.infohash)
    }
}
