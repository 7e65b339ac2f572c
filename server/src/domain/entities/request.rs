//! The inbound request this whole pipeline exists to answer.

use crate::shared::error::DomainError;
use torrent_identifier::RequestKind;

/// One content identifier, parsed from the external ID format
/// (`tt1234567`, `tt1234567:3:7`, `tmdb:603`, `tmdb:603:3:7`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub id: ExternalId,
    pub kind: RequestKind,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

/// An external content identifier, already split into source + numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalId {
    Imdb(String),
    Tmdb(i64),
}

impl MediaRequest {
    /// Parses `tt\d+`, `tt\d+:S:E`, `tmdb:\d+`, `tmdb:\d+:S:E`, with an
    /// optional trailing `.json` stripped first.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.strip_suffix(".json").unwrap_or(raw);
        let mut parts = raw.split(':');
        let head = parts
            .next()
            .ok_or_else(|| DomainError::InvalidInput(raw.to_string()))?;

        let id = if let Some(digits) = head.strip_prefix("tt") {
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(DomainError::InvalidInput(raw.to_string()));
            }
            ExternalId::Imdb(head.to_string())
        } else if head == "tmdb" {
            let tmdb_id: i64 = parts
                .next()
                .ok_or_else(|| DomainError::InvalidInput(raw.to_string()))?
                .parse()
                .map_err(|_| DomainError::InvalidInput(raw.to_string()))?;
            ExternalId::Tmdb(tmdb_id)
        } else {
            return Err(DomainError::InvalidInput(raw.to_string()));
        };

        let rest: Vec<&str> = parts.collect();
        let (kind, season, episode) = match rest.len() {
            0 => (RequestKind::Movie, None, None),
            2 => {
                let season: u32 = rest[0]
                    .parse()
                    .map_err(|_| DomainError::InvalidInput(raw.to_string()))?;
                let episode: u32 = rest[1]
                    .parse()
                    .map_err(|_| DomainError::InvalidInput(raw.to_string()))?;
                (RequestKind::Series, Some(season), Some(episode))
            }
            _ => return Err(DomainError::InvalidInput(raw.to_string())),
        };

        if kind == RequestKind::Series && season.unwrap_or(0) < 1 {
            return Err(DomainError::InvalidInput(raw.to_string()));
        }

        Ok(Self {
            id,
            kind,
            season,
            episode,
        })
    }

    /// Cache/search key fragment: a stable, non-PII identifier for this
    /// request's target content (not the whole request, episode included
    /// separately by callers that need it).
    pub fn external_id_key(&self) -> String {
        match &self.id {
            ExternalId::Imdb(tt) => tt.clone(),
            ExternalId::Tmdb(id) => format!("tmdb:{id}"),
        }
    }
}
