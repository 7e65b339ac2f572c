//! Search orchestrator (C6)
//!
//! Fans a query out to one or more provider adapters in parallel, bounded
//! by a global deadline, and merges their candidate sets.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::domain::entities::CandidateSet;
use crate::interfaces::external_services::ProviderAdapter;
use torrent_identifier::RequestKind;

pub struct SearchOrchestrator {
    general_provider: Arc<dyn ProviderAdapter>,
    french_provider: Arc<dyn ProviderAdapter>,
    deadline: Duration,
}

impl SearchOrchestrator {
    pub fn new(
        general_provider: Arc<dyn ProviderAdapter>,
        french_provider: Arc<dyn ProviderAdapter>,
        deadline_secs: u64,
    ) -> Self {
        Self {
            general_provider,
            french_provider,
            deadline: Duration::from_secs(deadline_secs),
        }
    }

    fn select_providers(&self, original_language: &str) -> Vec<Arc<dyn ProviderAdapter>> {
        if original_language.eq_ignore_ascii_case("fr") {
            vec![self.french_provider.clone()]
        } else {
            vec![self.general_provider.clone()]
        }
    }

    /// Invokes every selected adapter in its own task; adapters still
    /// running when `deadline` elapses are abandoned and contribute no
    /// candidates. A panicking adapter is logged and treated as empty.
    pub async fn orchestrate(
        &self,
        query: &str,
        kind: RequestKind,
        season: Option<u32>,
        episode: Option<u32>,
        original_language: &str,
        episode_only: bool,
    ) -> CandidateSet {
        let providers = self.select_providers(original_language);
        let query = query.to_string();

        let mut handles = Vec::with_capacity(providers.len());
        for provider in providers {
            let query = query.clone();
            handles.push(tokio::spawn(async move {
                let result = if episode_only {
                    match (season, episode) {
                        (Some(s), Some(e)) => provider.search_specific_episode(&query, kind, s, e).await,
                        _ => provider.search(&query, kind, season, episode).await,
                    }
                } else {
                    provider.search(&query, kind, season, episode).await
                };

                match result {
                    Ok(set) => set,
                    Err(err) => {
                        warn!(provider = provider.provider_id(), %err, "provider search failed");
                        CandidateSet::new()
                    }
                }
            }));
        }

        let mut merged = CandidateSet::new();
        let deadline = tokio::time::Instant::now() + self.deadline;
        let mut pending = handles;

        loop {
            if pending.is_empty() {
                break;
            }
            tokio::select! {
                biased;
                _ = tokio::time::sleep_until(deadline) => {
                    warn!(abandoned = pending.len(), "search orchestrator deadline elapsed; abandoning stragglers");
                    for handle in pending {
                        handle.abort();
                    }
                    break;
                }
                (result, _index, remaining) = futures::future::select_all(pending) => {
                    match result {
                        Ok(set) => merged.extend(set),
                        Err(join_err) => warn!(%join_err, "provider task panicked"),
                    }
                    pending = remaining;
                }
            }
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TorrentCandidate;
    use crate::shared::error::ProviderError;
    use async_trait::async_trait;
    use torrent_identifier::parse as parse_torrent_name;

    struct FakeProvider {
        id: &'static str,
        delay: Duration,
        title: &'static str,
    }

    #[async_trait]
    impl ProviderAdapter for FakeProvider {
        fn provider_id(&self) -> &str {
            self.id
        }

        async fn search(
            &self,
            _query: &str,
            kind: RequestKind,
            season: Option<u32>,
            episode: Option<u32>,
        ) -> Result<CandidateSet, ProviderError> {
            tokio::time::sleep(self.delay).await;
            let parsed = parse_torrent_name(self.title, kind, season, episode);
            let mut set = CandidateSet::new();
            set.insert(TorrentCandidate::new(self.id, "1", self.title, None, 1, parsed));
            Ok(set)
        }

        async fn search_specific_episode(
            &self,
            query: &str,
            kind: RequestKind,
            season: u32,
            episode: u32,
        ) -> Result<CandidateSet, ProviderError> {
            self.search(query, kind, Some(season), Some(episode)).await
        }

        async fn fetch_infohash(&self, _provider_internal_id: &str) -> Result<String, ProviderError> {
            Ok(String::new())
        }
    }

    fn orchestrator_with(general_delay: Duration, deadline_secs: u64) -> SearchOrchestrator {
        let general: Arc<dyn ProviderAdapter> = Arc::new(FakeProvider {
            id: "general",
            delay: general_delay,
            title: "Movie.2020.1080p.BluRay.x264-GROUP",
        });
        let french: Arc<dyn ProviderAdapter> = Arc::new(FakeProvider {
            id: "french",
            delay: Duration::from_millis(0),
            title: "Film.2020.1080p.BluRay.x264-GROUPE",
        });
        SearchOrchestrator::new(general, french, deadline_secs)
    }

    #[tokio::test]
    async fn returns_candidates_from_the_selected_provider_within_deadline() {
        let orchestrator = orchestrator_with(Duration::from_millis(10), 5);
        let merged = orchestrator.orchestrate("Movie", RequestKind::Movie, None, None, "en", false).await;
        assert_eq!(merged.movie.len(), 1);
        assert_eq!(merged.movie[0].provider_id, "general");
    }

    #[tokio::test]
    async fn selects_french_provider_for_french_original_language() {
        let orchestrator = orchestrator_with(Duration::from_millis(0), 5);
        let merged = orchestrator.orchestrate("Film", RequestKind::Movie, None, None, "fr", false).await;
        assert_eq!(merged.movie.len(), 1);
        assert_eq!(merged.movie[0].provider_id, "french");
    }

    #[tokio::test]
    async fn abandons_providers_that_outlive_the_deadline() {
        let orchestrator = orchestrator_with(Duration::from_millis(300), 0);
        let merged = orchestrator.orchestrate("Movie", RequestKind::Movie, None, None, "en", false).await;
        assert_eq!(merged.total_len(), 0);
    }
}
