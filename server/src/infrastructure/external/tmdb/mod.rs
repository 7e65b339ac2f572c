//! TMDB-backed metadata resolution (C3).

pub mod client;
pub mod dto;

pub use client::TmdbMetadataResolver;
