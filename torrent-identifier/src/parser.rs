//! Pure parsing and classification of torrent display titles.
//!
//! Nothing in this module touches the network or the filesystem: `parse`
//! is a pure function of its inputs, which keeps it trivially testable and
//! safe to call from both the orchestrator (classifying search results) and
//! the season-pack file selector (matching a candidate's internal files).

use crate::patterns::*;
use crate::types::{Classification, ParsedName, RequestKind, Resolution};

/// Parses a free-form torrent display title into structured fields and
/// classifies it relative to the requested `kind`/`season`/`episode`.
///
/// `requested_season`/`requested_episode` are only consulted for
/// classification (rule 4); resolution/codec/source extraction never looks
/// at the request.
pub fn parse(
    title: &str,
    kind: RequestKind,
    requested_season: Option<u32>,
    requested_episode: Option<u32>,
) -> ParsedName {
    let resolution = extract_resolution(title);
    let codec = extract_first(&CODEC_PATTERNS, title);
    let source = extract_first(&SOURCE_PATTERNS, title);
    let (season, episode) = extract_season_episode(title);
    let is_collection = COLLECTION_HINT.is_match(title);

    let classification = classify(
        kind,
        title,
        season,
        episode,
        is_collection,
        requested_season,
        requested_episode,
    );

    ParsedName {
        resolution,
        codec,
        source,
        season,
        episode,
        classification,
    }
}

fn extract_resolution(title: &str) -> Resolution {
    for (label, re) in RESOLUTION_PATTERNS.iter() {
        if re.is_match(title) {
            return match *label {
                "2160p" => Resolution::FourK,
                "1080p" => Resolution::R1080p,
                "720p" => Resolution::R720p,
                "480p" => Resolution::R480p,
                _ => Resolution::Unknown,
            };
        }
    }
    Resolution::Unknown
}

fn extract_first(patterns: &[(&'static str, regex::Regex)], title: &str) -> Option<String> {
    patterns
        .iter()
        .find(|(_, re)| re.is_match(title))
        .map(|(label, _)| label.to_string())
}

/// Season/episode regex union from the spec: `S##E##`, `S##.E##`, `##x##`,
/// `Season N Episode M`, falling back to a season-only match.
pub fn extract_season_episode(title: &str) -> (Option<u32>, Option<u32>) {
    if let Some(caps) = SXXEXX.captures(title) {
        return (
            caps.get(1).and_then(|m| m.as_str().parse().ok()),
            caps.get(2).and_then(|m| m.as_str().parse().ok()),
        );
    }
    if let Some(caps) = NXN.captures(title) {
        return (
            caps.get(1).and_then(|m| m.as_str().parse().ok()),
            caps.get(2).and_then(|m| m.as_str().parse().ok()),
        );
    }
    if let Some(caps) = SEASON_EPISODE_WORDS.captures(title) {
        return (
            caps.get(1).and_then(|m| m.as_str().parse().ok()),
            caps.get(2).and_then(|m| m.as_str().parse().ok()),
        );
    }
    if let Some(caps) = SEASON_ONLY.captures(title) {
        return (caps.get(1).and_then(|m| m.as_str().parse().ok()), None);
    }
    (None, None)
}

#[allow(clippy::too_many_arguments)]
fn classify(
    kind: RequestKind,
    title: &str,
    season: Option<u32>,
    episode: Option<u32>,
    is_collection: bool,
    requested_season: Option<u32>,
    requested_episode: Option<u32>,
) -> Classification {
    let lower = title.to_lowercase();

    if kind == RequestKind::Movie {
        return if is_collection {
            Classification::Unknown
        } else {
            Classification::Movie
        };
    }

    if lower.contains("complete") && season.is_none() && episode.is_none() {
        return Classification::CompleteSeries;
    }

    match (season, episode) {
        (Some(s), Some(e)) => {
            let matches_requested = requested_season == Some(s) && requested_episode == Some(e);
            if matches_requested {
                Classification::Episode
            } else if SEASON_PACK_HINT.is_match(title) {
                Classification::CompleteSeason
            } else {
                Classification::Unknown
            }
        }
        (Some(_), None) => Classification::CompleteSeason,
        _ if SEASON_PACK_HINT.is_match(title) => Classification::CompleteSeason,
        _ => Classification::Unknown,
    }
}

/// `matches_year` tolerates a +/-1 year difference, and -- per the
/// documented open question -- also lets titles through when they carry no
/// year at all.
pub fn matches_year(title: &str, expected_year: Option<u32>) -> bool {
    let Some(expected) = expected_year else {
        return true;
    };
    match YEAR.find(title) {
        Some(m) => {
            let found: i64 = m.as_str().parse().unwrap_or(0);
            (found - expected as i64).abs() <= 1
        }
        None => true,
    }
}

/// Used both to classify a filename inside a season pack and to drive
/// `SELECT_FILE`: does this filename's own season/episode equal the target?
pub fn matches_episode(filename: &str, season: u32, episode: u32) -> bool {
    let (s, e) = extract_season_episode(filename);
    s == Some(season) && e == Some(episode)
}
