//! Shared query normalization, caching, and result classification for C5
//! adapters.

use torrent_identifier::{parse as parse_torrent_name, RequestKind};

use crate::domain::entities::{CandidateSet, TorrentCandidate};
use crate::infrastructure::external::providers::dto::SearchResultDto;
use crate::shared::text::TitleNormalizer;

/// Search and infohash cache entries sit toward the volatile end of C2's
/// 6-24h TTL range; results churn faster than resolved metadata.
pub const SEARCH_CACHE_TTL_SECS: u64 = 6 * 3600;

/// Builds the provider query string: `title s##` for whole-season mode,
/// `title s##e##` when an exact episode is requested, plain title
/// otherwise. A movie's `title year` form (per the common query
/// normalization rule) is built by the pipeline controller, which is the
/// only layer that knows the resolved year; this function only adds the
/// season/episode suffix the trait's own arguments carry.
pub fn build_query(title: &str, kind: RequestKind, season: Option<u32>, episode: Option<u32>) -> String {
    match (kind, season, episode) {
        (RequestKind::Series, Some(s), Some(e)) if e > 0 => format!("{title} s{s:02}e{e:02}"),
        (RequestKind::Series, Some(s), _) => format!("{title} s{s:02}"),
        _ => title.to_string(),
    }
}

/// `search:<provider>:<normalizedQuery>:<kind>:<S>:<E>` — keyed on the bare
/// title, not the already-suffixed provider query, so a movie's cache
/// entry doesn't depend on whether the year lookup succeeded.
pub fn search_cache_key(provider_id: &str, title: &str, kind: RequestKind, season: Option<u32>, episode: Option<u32>) -> String {
    let normalized = TitleNormalizer::normalize_for_comparison(title);
    format!(
        "search:{provider_id}:{normalized}:{kind:?}:{}:{}",
        season.map(|s| s.to_string()).unwrap_or_default(),
        episode.map(|e| e.to_string()).unwrap_or_default(),
    )
}

/// `hash:<provider>:<internalID>`.
pub fn hash_cache_key(provider_id: &str, provider_internal_id: &str) -> String {
    format!("hash:{provider_id}:{provider_internal_id}")
}

/// Parses and classifies every search result, routing each into its
/// [`CandidateSet`] bucket (unknown-classified candidates are dropped by
/// `CandidateSet::insert`).
pub fn classify_results(
    provider_id: &str,
    results: Vec<SearchResultDto>,
    kind: RequestKind,
    season: Option<u32>,
    episode: Option<u32>,
) -> CandidateSet {
    let mut set = CandidateSet::new();
    for result in results {
        let parsed = parse_torrent_name(&result.title, kind, season, episode);
        let candidate = TorrentCandidate::new(
            provider_id,
            result.id,
            result.title,
            result.infohash,
            result.size_bytes,
            parsed,
        );
        set.insert(candidate);
    }
    set
}
