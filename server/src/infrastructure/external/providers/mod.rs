//! Torrent search provider adapters (C5).

pub mod common;
pub mod dto;
pub mod french;
pub mod general;

pub use french::FrenchProviderAdapter;
pub use general::GeneralProviderAdapter;
