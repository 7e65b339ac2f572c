//! Torrent search results and their classification buckets (C5/C6 output).

use serde::{Deserialize, Serialize};
use torrent_identifier::{Classification, ParsedName};

/// One torrent returned by a provider adapter.
///
/// `infohash` starts empty for providers that only resolve it on demand
/// (single-assignment: once a fetch succeeds it is never cleared).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorrentCandidate {
    pub provider_id: String,
    pub provider_internal_id: String,
    pub display_title: String,
    pub infohash: Option<String>,
    pub size_bytes: u64,
    pub parsed: ParsedName,
}

impl TorrentCandidate {
    pub fn new(
        provider_id: impl Into<String>,
        provider_internal_id: impl Into<String>,
        display_title: impl Into<String>,
        infohash: Option<String>,
        size_bytes: u64,
        parsed: ParsedName,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            provider_internal_id: provider_internal_id.into(),
            display_title: display_title.into(),
            infohash,
            size_bytes,
            parsed,
        }
    }

    pub fn is_remux(&self) -> bool {
        self.display_title.to_lowercase().contains("remux")
    }
}

/// Four buckets keyed by classification; a candidate lives in exactly one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateSet {
    pub movie: Vec<TorrentCandidate>,
    pub episode: Vec<TorrentCandidate>,
    pub complete_season: Vec<TorrentCandidate>,
    pub complete_series: Vec<TorrentCandidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes a parsed candidate into its bucket; candidates classified
    /// `unknown` are discarded.
    pub fn insert(&mut self, candidate: TorrentCandidate) {
        match candidate.parsed.classification {
            Classification::Movie => self.movie.push(candidate),
            Classification::Episode => self.episode.push(candidate),
            Classification::CompleteSeason => self.complete_season.push(candidate),
            Classification::CompleteSeries => self.complete_series.push(candidate),
            Classification::Unknown => {}
        }
    }

    /// Concatenates another set's buckets onto this one; no cross-provider
    /// dedup (a duplicate torrent from two providers just means two
    /// candidates with the same eventual infohash).
    pub fn extend(&mut self, other: CandidateSet) {
        self.movie.extend(other.movie);
        self.episode.extend(other.episode);
        self.complete_season.extend(other.complete_season);
        self.complete_series.extend(other.complete_series);
    }

    pub fn retain_movie<F: FnMut(&TorrentCandidate) -> bool>(&mut self, f: F) {
        self.movie.retain(f);
    }

    pub fn total_len(&self) -> usize {
        self.movie.len() + self.episode.len() + self.complete_season.len() + self.complete_series.len()
    }
}
