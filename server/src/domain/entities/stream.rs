//! The terminal output of the whole pipeline: a playable direct link.

use serde::Serialize;

/// One entry in the Stremio-shaped `streams` array returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct Stream {
    pub name: String,
    pub title: String,
    pub url: String,
}

impl Stream {
    pub fn new(name: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}
