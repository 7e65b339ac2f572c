//! Metadata resolved from an external identifier (C3's output).

use serde::{Deserialize, Serialize};
use torrent_identifier::RequestKind;

/// {kind, canonicalTitle, year?, originalLanguage}, cached in C2 keyed by
/// external id. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub kind: RequestKind,
    pub canonical_title: String,
    pub year: Option<u32>,
    pub original_language: String,
}

impl MediaInfo {
    pub fn new(
        kind: RequestKind,
        canonical_title: impl Into<String>,
        year: Option<u32>,
        original_language: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            canonical_title: canonical_title.into(),
            year,
            original_language: original_language.into(),
        }
    }

    pub fn is_french(&self) -> bool {
        self.original_language.eq_ignore_ascii_case("fr")
    }
}
