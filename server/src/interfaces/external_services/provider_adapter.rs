//! Provider adapter interface (C5's port).

use async_trait::async_trait;

use crate::domain::entities::CandidateSet;
use crate::shared::error::ProviderError;
use torrent_identifier::RequestKind;

/// One torrent-index provider. Each implementation owns its own rate
/// limit bucket and cache keyspace through C1/C2.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable identifier set on every candidate this adapter returns.
    fn provider_id(&self) -> &str;

    /// Season-pack-friendly search: for series this should match both
    /// individual episodes and whole-season releases.
    async fn search(
        &self,
        query: &str,
        kind: RequestKind,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Result<CandidateSet, ProviderError>;

    /// Narrower search naming the exact episode, used by the controller's
    /// fallback phase.
    async fn search_specific_episode(
        &self,
        query: &str,
        kind: RequestKind,
        season: u32,
        episode: u32,
    ) -> Result<CandidateSet, ProviderError>;

    /// Resolves a candidate's infohash on demand, for providers that don't
    /// return it inline with search results.
    async fn fetch_infohash(&self, provider_internal_id: &str) -> Result<String, ProviderError>;
}
