//! Wire shape shared by the JSON-search provider adapters (C5).

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultDto {
    pub id: String,
    pub title: String,
    pub size_bytes: u64,
    pub infohash: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InfohashResponse {
    pub infohash: String,
}
