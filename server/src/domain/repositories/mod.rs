//! Repository Interfaces - Abstractions for data access
//!
//! Repository interfaces define the contract for data access implementations.
//! They use domain entities and return domain errors.

pub mod cache_repository;
pub mod magnet_repository;

pub use cache_repository::{CacheRepository, CacheStats};
pub use magnet_repository::{MagnetRecord, MagnetRepository};
