//! Domain Layer - Pure business logic and domain models
//!
//! This layer contains:
//! - Entities: Core business objects with identity
//! - Repository Interfaces: Abstractions for data access

pub mod entities;
pub mod repositories;

pub use entities::{
    CandidateSet, ExternalId, FileLink, MagnetStatus, MediaInfo, MediaRequest, PollResult,
    Readiness, Stream, SubmittedMagnet, TorrentCandidate,
};
pub use repositories::{CacheRepository, CacheStats, MagnetRecord, MagnetRepository};
