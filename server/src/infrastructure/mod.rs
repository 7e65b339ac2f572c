//! Infrastructure Layer
//!
//! This module contains all infrastructure implementations:
//! - `persistence` — SQLite repository implementations
//! - `external` — TMDB, torrent provider, and debrid adapters
//! - `http` — shared rate-limited HTTP caller (C1)
//! - `cache` — two-tier cache (C2)
//! - `database` — connection pooling and schema

pub mod cache;
pub mod database;
pub mod external;
pub mod http;
pub mod persistence;

pub use cache::{InMemoryCache, MultiLevelCache};
pub use database::{initialize_schema, ConnectionPool};
pub use external::{FrenchProviderAdapter, GeneralProviderAdapter, RealDebridClient, TmdbMetadataResolver};
pub use http::RateLimitedClient;
pub use persistence::sqlite::{SqliteCacheRepository, SqliteMagnetRepository};
