//! Regex tables used by the parser. Kept separate from `parser.rs` so the
//! rule ordering in one module does not get tangled with the regexes
//! themselves.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// First match wins; order encodes preference (4k over 2160p spelling, etc).
    pub static ref RESOLUTION_PATTERNS: Vec<(&'static str, Regex)> = vec![
        ("2160p", Regex::new(r"(?i)\b(2160p|4k)\b").unwrap()),
        ("1080p", Regex::new(r"(?i)\b1080[pi]\b").unwrap()),
        ("720p", Regex::new(r"(?i)\b720p\b").unwrap()),
        ("480p", Regex::new(r"(?i)\b480p\b").unwrap()),
    ];

    pub static ref CODEC_PATTERNS: Vec<(&'static str, Regex)> = vec![
        ("x265", Regex::new(r"(?i)\b[xh]\.?265\b").unwrap()),
        ("HEVC", Regex::new(r"(?i)\bHEVC\b").unwrap()),
        ("x264", Regex::new(r"(?i)\b[xh]\.?264\b").unwrap()),
        ("AV1", Regex::new(r"(?i)\bAV1\b").unwrap()),
        ("XviD", Regex::new(r"(?i)\bXviD\b").unwrap()),
    ];

    pub static ref SOURCE_PATTERNS: Vec<(&'static str, Regex)> = vec![
        ("REMUX", Regex::new(r"(?i)\bremux\b").unwrap()),
        ("BluRay", Regex::new(r"(?i)\b(BluRay|Blu-Ray|BDRip|BRRip|BD)\b").unwrap()),
        ("WEB-DL", Regex::new(r"(?i)\bWEB-?DL\b").unwrap()),
        ("WEBRip", Regex::new(r"(?i)\bWEBRip\b").unwrap()),
        ("HDTV", Regex::new(r"(?i)\bHDTV\b").unwrap()),
        ("DVDRip", Regex::new(r"(?i)\b(DVDRip|DVD)\b").unwrap()),
    ];

    /// `S##E##`, `S##.E##`, with optional leading zeros and up to 3-digit
    /// episode numbers (needed to recognize e.g. `S01E117`-style absolute
    /// numbering some release groups use for long-running shows).
    pub static ref SXXEXX: Regex =
        Regex::new(r"(?i)\bS(\d{1,2})\.?E(\d{1,3})\b").unwrap();

    /// `1x01`, `01x01`
    pub static ref NXN: Regex = Regex::new(r"(?i)\b(\d{1,2})x(\d{1,3})\b").unwrap();

    /// `Season 3 Episode 7`, `Season.3.Episode.7`
    pub static ref SEASON_EPISODE_WORDS: Regex =
        Regex::new(r"(?i)\bSeason[.\s]?(\d{1,2})[.\s]?Episode[.\s]?(\d{1,3})\b").unwrap();

    /// Season-only, e.g. `S03`, `Season 3`, `Saison 3` (French).
    pub static ref SEASON_ONLY: Regex =
        Regex::new(r"(?i)\bS(?:eason|aison)?\.?\s?(\d{1,2})\b").unwrap();

    /// `complete season N` / `saison N integrale` / bare `pack`.
    pub static ref SEASON_PACK_HINT: Regex = Regex::new(
        r"(?i)\b(complete[.\s]?season|saison[.\s]?\d{1,2}[.\s]?(integrale|complete)|integrale[.\s]?saison|\bpack\b)\b"
    ).unwrap();

    /// Whole-collection markers: complete/integrale/saga/trilogy/year range.
    pub static ref COLLECTION_HINT: Regex = Regex::new(
        r"(?i)\b(complete|integrale|saga|trilogy)\b|\b(19|20)\d{2}-(19|20)\d{2}\b"
    ).unwrap();

    pub static ref YEAR: Regex = Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap();
}

pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".webm", ".m4v", ".mpg", ".mpeg", ".ts",
    ".m2ts",
];

pub fn has_video_extension(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
