//! External service adapters: TMDB metadata (C3), torrent providers (C5),
//! debrid service (C8).

pub mod debrid;
pub mod providers;
pub mod tmdb;

pub use debrid::RealDebridClient;
pub use providers::{FrenchProviderAdapter, GeneralProviderAdapter};
pub use tmdb::TmdbMetadataResolver;
