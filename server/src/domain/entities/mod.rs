pub mod candidate;
pub mod magnet;
pub mod metadata;
pub mod request;
pub mod stream;

pub use candidate::{CandidateSet, TorrentCandidate};
pub use magnet::{FileLink, MagnetStatus, PollResult, Readiness, SubmittedMagnet};
pub use metadata::MediaInfo;
pub use request::{ExternalId, MediaRequest};
pub use stream::Stream;
