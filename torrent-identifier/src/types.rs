use serde::{Deserialize, Serialize};
use std::fmt;

/// Video resolution extracted from a release title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Covers both `2160p` and `4k` release labels; the spec treats them as
    /// one resolution value.
    #[serde(rename = "4k")]
    FourK,
    #[serde(rename = "1080p")]
    R1080p,
    #[serde(rename = "720p")]
    R720p,
    #[serde(rename = "480p")]
    R480p,
    Unknown,
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Unknown
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Resolution::FourK => "4k",
            Resolution::R1080p => "1080p",
            Resolution::R720p => "720p",
            Resolution::R480p => "480p",
            Resolution::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// What kind of torrent a title was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Movie,
    Episode,
    CompleteSeason,
    CompleteSeries,
    Unknown,
}

impl Default for Classification {
    fn default() -> Self {
        Classification::Unknown
    }
}

/// The kind of media a request targets. A candidate torrent is classified
/// into a [`Classification`] relative to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Movie,
    Series,
}

/// Structured information pulled out of a free-form torrent display title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedName {
    pub resolution: Resolution,
    pub codec: Option<String>,
    pub source: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub classification: Classification,
}

impl ParsedName {
    pub fn is_collection(&self) -> bool {
        matches!(
            self.classification,
            Classification::CompleteSeason | Classification::CompleteSeries
        )
    }
}
