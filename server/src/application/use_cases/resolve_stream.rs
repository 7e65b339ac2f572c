//! Pipeline controller
//!
//! The one use case this whole crate exists to run: turn a parsed
//! [`MediaRequest`] into zero or one playable [`Stream`] by resolving
//! metadata, searching providers, ranking candidates, and driving each
//! through the debrid service until one yields a direct link.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::application::services::{PrioritySorter, SearchOrchestrator};
use crate::domain::entities::{CandidateSet, MagnetStatus, MediaInfo, MediaRequest, Stream, SubmittedMagnet, TorrentCandidate};
use crate::interfaces::external_services::{DebridClient, MetadataResolver, ProviderAdapter};
use crate::shared::error::PipelineError;
use torrent_identifier::{matches_episode, matches_year, RequestKind, Resolution};

const POLL_ATTEMPTS: u32 = 2;
const POLL_SPACING: Duration = Duration::from_secs(3);

pub struct ResolveStreamUseCase {
    metadata_resolver: Arc<dyn MetadataResolver>,
    search_orchestrator: Arc<SearchOrchestrator>,
    debrid: Arc<dyn DebridClient>,
    providers_by_id: HashMap<String, Arc<dyn ProviderAdapter>>,
    overall_deadline: Duration,
}

impl ResolveStreamUseCase {
    pub fn new(
        metadata_resolver: Arc<dyn MetadataResolver>,
        search_orchestrator: Arc<SearchOrchestrator>,
        debrid: Arc<dyn DebridClient>,
        providers: Vec<Arc<dyn ProviderAdapter>>,
        overall_deadline_secs: u64,
    ) -> Self {
        let providers_by_id = providers
            .into_iter()
            .map(|p| (p.provider_id().to_string(), p))
            .collect();

        Self {
            metadata_resolver,
            search_orchestrator,
            debrid,
            providers_by_id,
            overall_deadline: Duration::from_secs(overall_deadline_secs),
        }
    }

    /// Parses `raw_id` into a [`MediaRequest`] and runs the pipeline. The
    /// parse is the only failure this use case ever surfaces to its caller;
    /// every later failure (metadata miss, empty search, debrid rejection)
    /// is demoted to an empty stream list.
    pub async fn execute(
        &self,
        raw_id: &str,
        api_key: &str,
        preference: &[Resolution],
    ) -> Result<Vec<Stream>, PipelineError> {
        let request = MediaRequest::parse(raw_id)?;

        let streams = match tokio::time::timeout(self.overall_deadline, self.execute_inner(&request, api_key, preference)).await {
            Ok(streams) => streams,
            Err(_) => {
                warn!("pipeline controller overall deadline elapsed");
                Vec::new()
            }
        };
        Ok(streams)
    }

    async fn execute_inner(&self, request: &MediaRequest, api_key: &str, preference: &[Resolution]) -> Vec<Stream> {
        let info = match self.metadata_resolver.resolve(&request.id, Some(request.kind)).await {
            Ok(info) => info,
            Err(err) => {
                warn!(%err, "metadata resolution failed");
                return Vec::new();
            }
        };

        if let Some(stream) = self.run_phase(request, &info, &info.canonical_title, false, preference, api_key).await {
            return vec![stream];
        }

        if request.kind == RequestKind::Series && request.episode.unwrap_or(0) > 0 {
            if let Some(stream) = self.run_phase(request, &info, &info.canonical_title, true, preference, api_key).await {
                return vec![stream];
            }
        }

        if let Some(stream) = self.run_broad_retry(request, &info, preference, api_key).await {
            return vec![stream];
        }

        Vec::new()
    }

    async fn run_phase(
        &self,
        request: &MediaRequest,
        info: &MediaInfo,
        query: &str,
        episode_only: bool,
        preference: &[Resolution],
        api_key: &str,
    ) -> Option<Stream> {
        let (season, episode) = match request.kind {
            RequestKind::Movie => (None, None),
            RequestKind::Series => (request.season, request.episode),
        };

        let mut candidates = self
            .search_orchestrator
            .orchestrate(query, request.kind, season, episode, &info.original_language, episode_only)
            .await;

        if request.kind == RequestKind::Movie {
            candidates.retain_movie(|c| matches_year(&c.display_title, info.year));
        }

        let mut ordered = prioritize(&candidates, request.kind, episode);
        PrioritySorter::sort(&mut ordered, preference);

        for candidate in ordered {
            if let Some(stream) = self.try_candidate(&candidate, season, episode, api_key).await {
                return Some(stream);
            }
        }
        None
    }

    /// Drops season/episode constraints and retries with the bare title,
    /// the pipeline's last resort before giving up.
    async fn run_broad_retry(&self, request: &MediaRequest, info: &MediaInfo, preference: &[Resolution], api_key: &str) -> Option<Stream> {
        let mut candidates = self
            .search_orchestrator
            .orchestrate(&info.canonical_title, request.kind, None, None, &info.original_language, false)
            .await;

        if request.kind == RequestKind::Movie {
            candidates.retain_movie(|c| matches_year(&c.display_title, info.year));
        }

        let mut ordered = prioritize(&candidates, request.kind, request.episode);
        PrioritySorter::sort(&mut ordered, preference);

        for candidate in ordered {
            if let Some(stream) = self.try_candidate(&candidate, request.season, request.episode, api_key).await {
                return Some(stream);
            }
        }
        None
    }

    async fn try_candidate(
        &self,
        candidate: &TorrentCandidate,
        season: Option<u32>,
        episode: Option<u32>,
        api_key: &str,
    ) -> Option<Stream> {
        let infohash = match &candidate.infohash {
            Some(h) if !h.is_empty() => h.clone(),
            _ => {
                let provider = self.providers_by_id.get(&candidate.provider_id)?;
                match provider.fetch_infohash(&candidate.provider_internal_id).await {
                    Ok(h) if !h.is_empty() => h,
                    _ => return None,
                }
            }
        };

        let debrid_id = match self.debrid.submit(&infohash, &candidate.display_title, api_key).await {
            Ok(id) => id,
            Err(err) => {
                warn!(%err, provider = %candidate.provider_id, "submit failed, skipping candidate");
                return None;
            }
        };
        let mut magnet = SubmittedMagnet::new(infohash.clone(), debrid_id);

        let mut size_bytes = 0;
        for attempt in 0..POLL_ATTEMPTS {
            match self.debrid.poll(&[infohash.clone()], api_key).await {
                Ok(results) => {
                    if let Some(r) = results.into_iter().find(|r| r.infohash == infohash && r.is_ready()) {
                        size_bytes = r.size_bytes;
                        magnet.mark_ready(r.files.unwrap_or_default());
                        break;
                    }
                }
                Err(err) => warn!(%err, "poll failed"),
            }
            if attempt + 1 < POLL_ATTEMPTS {
                tokio::time::sleep(POLL_SPACING).await;
            }
        }
        if magnet.status != MagnetStatus::Ready {
            magnet.mark_error("not ready after poll attempts");
        }
        if magnet.is_terminal_failure() {
            return None;
        }

        let is_season_pack = candidate.parsed.is_collection();
        let file = select_file(&magnet, season, episode, is_season_pack)?.clone();

        let url = match self.debrid.unlock(&file.link, api_key).await {
            Ok(url) if !url.is_empty() => url,
            _ => return None,
        };
        magnet.mark_streamable();

        let title = format!(
            "{}\n{} \u{b7} {}",
            candidate.display_title,
            format_size(size_bytes),
            file.path
        );
        Some(Stream::new(candidate.provider_id.clone(), title, url))
    }
}

/// PRIORITIZE: bucket ordering before the within-bucket C7 sort.
fn prioritize(candidates: &CandidateSet, kind: RequestKind, episode: Option<u32>) -> Vec<TorrentCandidate> {
    match kind {
        RequestKind::Movie => candidates.movie.clone(),
        RequestKind::Series => {
            let mut ordered = Vec::new();
            if episode.unwrap_or(0) > 0 {
                ordered.extend(candidates.complete_season.iter().cloned());
                ordered.extend(candidates.episode.iter().cloned());
                ordered.extend(candidates.complete_series.iter().cloned());
            } else {
                ordered.extend(candidates.complete_season.iter().cloned());
                ordered.extend(candidates.complete_series.iter().cloned());
                ordered.extend(candidates.episode.iter().cloned());
            }
            ordered
        }
    }
}

/// SELECT_FILE.
fn select_file<'a>(
    magnet: &'a SubmittedMagnet,
    season: Option<u32>,
    episode: Option<u32>,
    is_season_pack: bool,
) -> Option<&'a crate::domain::entities::FileLink> {
    if let (Some(s), Some(e)) = (season, episode) {
        if e > 0 {
            if let Some(file) = magnet.files.iter().filter(|f| matches_episode(&f.path, s, e)).max_by_key(|f| f.size_bytes) {
                return Some(file);
            }
            if is_season_pack {
                return magnet.largest_video_file();
            }
            return None;
        }
    }
    magnet.largest_video_file()
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} {}", UNITS[unit])
    } else {
        format!("{size:.2} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FileLink;

    #[test]
    fn format_size_uses_largest_sensible_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    fn ready_magnet(files: Vec<FileLink>) -> SubmittedMagnet {
        let mut magnet = SubmittedMagnet::new("infohash", "debrid-id");
        magnet.mark_ready(files);
        magnet
    }

    #[test]
    fn select_file_matches_target_episode() {
        let magnet = ready_magnet(vec![
            FileLink { path: "Show.S01E02.mkv".to_string(), size_bytes: 100, link: "a".to_string() },
            FileLink { path: "Show.S01E03.mkv".to_string(), size_bytes: 200, link: "b".to_string() },
        ]);
        let picked = select_file(&magnet, Some(1), Some(3), false).unwrap();
        assert_eq!(picked.path, "Show.S01E03.mkv");
    }

    #[test]
    fn select_file_falls_back_to_largest_video_for_season_pack() {
        let magnet = ready_magnet(vec![
            FileLink { path: "sample.mkv".to_string(), size_bytes: 10, link: "a".to_string() },
            FileLink { path: "Show.S01E09.mkv".to_string(), size_bytes: 900, link: "b".to_string() },
        ]);
        let picked = select_file(&magnet, Some(1), Some(99), true).unwrap();
        assert_eq!(picked.path, "Show.S01E09.mkv");
    }

    #[test]
    fn select_file_fails_without_match_or_season_pack() {
        let magnet = ready_magnet(vec![FileLink { path: "Show.S01E02.mkv".to_string(), size_bytes: 100, link: "a".to_string() }]);
        assert!(select_file(&magnet, Some(1), Some(3), false).is_none());
    }

    #[test]
    fn mark_error_after_terminal_failure_stays_error() {
        let mut magnet = SubmittedMagnet::new("infohash", "debrid-id");
        magnet.mark_error("debrid rejected");
        assert!(magnet.is_terminal_failure());
    }
}
