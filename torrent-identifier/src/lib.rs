//! Parses and classifies free-form torrent release titles.
//!
//! This crate has exactly one job: turn a string like
//! `"Breaking.Bad.S03.COMPLETE.1080p.BluRay.x264-GROUP"` into a
//! [`ParsedName`] describing its resolution, codec, source, season/episode,
//! and classification relative to a requested (kind, season, episode). It
//! does not know about providers, caches, or debrid services.
//!
//! ```
//! use torrent_identifier::{parse, RequestKind};
//!
//! let parsed = parse("Dark.Matter.S01E05.720p.HDTV.x264-KILLERS", RequestKind::Series, Some(1), Some(5));
//! assert_eq!(parsed.season, Some(1));
//! assert_eq!(parsed.episode, Some(5));
//! ```

pub mod parser;
pub mod patterns;
pub mod types;

pub use parser::{extract_season_episode, matches_episode, matches_year, parse};
pub use patterns::{has_video_extension, VIDEO_EXTENSIONS};
pub use types::{Classification, ParsedName, RequestKind, Resolution};
