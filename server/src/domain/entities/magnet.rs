//! Debrid submission state (C8's output, C9's input for SELECT_FILE).

use chrono::{DateTime, Utc};

/// State machine for a magnet handed to the debrid service.
///
/// Transitions: `Init -> Submitted -> Ready -> Streamable`, with `Error`
/// reachable from any non-terminal state. No transition moves backwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MagnetStatus {
    Init,
    Submitted,
    Ready,
    Streamable,
    Error(String),
}

/// One file inside a submitted torrent, as reported by the debrid service.
///
/// `link` is the opaque, debrid-internal reference `unlock` exchanges for a
/// time-limited direct URL; it is not itself playable.
#[derive(Debug, Clone, PartialEq)]
pub struct FileLink {
    pub path: String,
    pub size_bytes: u64,
    pub link: String,
}

/// The debrid service's own readiness vocabulary, as returned by `poll`.
/// Distinct from [`MagnetStatus`], which tracks this pipeline's view of a
/// single submission end-to-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    NotStarted,
    Downloading,
    Downloaded,
    Ready,
    Error,
}

/// One entry of a `poll` response.
#[derive(Debug, Clone)]
pub struct PollResult {
    pub infohash: String,
    pub readiness: Readiness,
    pub files: Option<Vec<FileLink>>,
    pub size_bytes: u64,
}

impl PollResult {
    /// Ready requires both a `ready` status code and a non-empty file list.
    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
            && self.files.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// A magnet submitted to the debrid service, tracked through to a
/// streamable direct link.
#[derive(Debug, Clone)]
pub struct SubmittedMagnet {
    pub infohash: String,
    pub debrid_id: String,
    pub status: MagnetStatus,
    pub files: Vec<FileLink>,
    pub submitted_at: DateTime<Utc>,
}

impl SubmittedMagnet {
    pub fn new(infohash: impl Into<String>, debrid_id: impl Into<String>) -> Self {
        Self {
            infohash: infohash.into(),
            debrid_id: debrid_id.into(),
            status: MagnetStatus::Submitted,
            files: Vec::new(),
            submitted_at: Utc::now(),
        }
    }

    pub fn mark_ready(&mut self, files: Vec<FileLink>) {
        self.files = files;
        self.status = MagnetStatus::Ready;
    }

    pub fn mark_streamable(&mut self) {
        if self.status == MagnetStatus::Ready {
            self.status = MagnetStatus::Streamable;
        }
    }

    pub fn mark_error(&mut self, reason: impl Into<String>) {
        self.status = MagnetStatus::Error(reason.into());
    }

    pub fn is_terminal_failure(&self) -> bool {
        matches!(self.status, MagnetStatus::Error(_))
    }

    /// Picks the largest video file by extension, the file a stream link
    /// is built from once the torrent is ready.
    pub fn largest_video_file(&self) -> Option<&FileLink> {
        self.files
            .iter()
            .filter(|f| torrent_identifier::has_video_extension(&f.path))
            .max_by_key(|f| f.size_bytes)
    }
}
