//! streamd
//!
//! Streaming-addon request pipeline: resolves an external id, searches
//! torrent providers, ranks candidates, and unlocks a direct link through a
//! debrid service. Exposes core modules for integration tests and as a
//! library.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod shared;

