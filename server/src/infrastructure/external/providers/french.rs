//! French-specialized torrent provider adapter (C5).
//!
//! Delegates the mechanics of searching to a [`GeneralProviderAdapter`]
//! pointed at a French-focused index. Spec §4.5 has this adapter ask C3 for
//! a French-localized title before searching; the `ProviderAdapter` port
//! only carries a pre-resolved `query` string, not the external id C3 needs
//! to re-resolve against, so this adapter searches with whatever title the
//! orchestrator already resolved. Deliberate no-op, not a missed wiring:
//! threading the external id through `search`/`searchSpecificEpisode` would
//! mean every adapter (including `GeneralProviderAdapter`) takes on a C3
//! dependency it otherwise has no use for.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::CandidateSet;
use crate::domain::repositories::CacheRepository;
use crate::infrastructure::external::providers::general::GeneralProviderAdapter;
use crate::infrastructure::http::RateLimitedClient;
use crate::interfaces::external_services::ProviderAdapter;
use crate::shared::error::ProviderError;
use torrent_identifier::RequestKind;

pub struct FrenchProviderAdapter {
    inner: GeneralProviderAdapter,
}

impl FrenchProviderAdapter {
    pub fn new(
        provider_id: impl Into<String>,
        base_url: impl Into<String>,
        http: Arc<RateLimitedClient>,
        cache: Arc<dyn CacheRepository>,
    ) -> Self {
        Self {
            inner: GeneralProviderAdapter::new(provider_id, base_url, http, cache),
        }
    }
}

#[async_trait]
impl ProviderAdapter for FrenchProviderAdapter {
    fn provider_id(&self) -> &str {
        self.inner.provider_id()
    }

    async fn search(
        &self,
        query: &str,
        kind: RequestKind,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Result<CandidateSet, ProviderError> {
        self.inner.search(query, kind, season, episode).await
    }

    async fn search_specific_episode(
        &self,
        query: &str,
        kind: RequestKind,
        season: u32,
        episode: u32,
    ) -> Result<CandidateSet, ProviderError> {
        self.inner.search_specific_episode(query, kind, season, episode).await
    }

    async fn fetch_infohash(&self, provider_internal_id: &str) -> Result<String, ProviderError> {
        self.inner.fetch_infohash(provider_internal_id).await
    }
}
