//! Debrid API wire types (C8).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollEntry {
    pub infohash: String,
    pub status: String,
    pub status_code: i32,
    pub size_bytes: u64,
    pub files: Option<Vec<PollFile>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollFile {
    pub path: String,
    pub size_bytes: u64,
    pub link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnlockResponse {
    pub direct_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest<'a> {
    pub infohash: &'a str,
    pub label: &'a str,
}
