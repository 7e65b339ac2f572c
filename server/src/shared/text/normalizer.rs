//! Title normalization utilities
//!
//! Provides functions to normalize free-form titles for use as search
//! queries and comparison keys: punctuation stripping, article handling,
//! and whitespace collapsing.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_ARTICLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(the|a|an)\s+").unwrap());

static TRAILING_ARTICLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),\s*(the|a|an)$").unwrap());

static MULTIPLE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[''""!?,;.:]"#).unwrap());

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._]").unwrap());

static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

/// Title normalizer for search-query construction (C5).
pub struct TitleNormalizer;

impl TitleNormalizer {
    /// Light normalization: separators and hyphens to spaces, collapse
    /// whitespace. Preserves case and word order.
    pub fn normalize(title: &str) -> String {
        let mut result = SEPARATORS.replace_all(title, " ").to_string();
        result = result.replace(" - ", " ");
        result = MULTIPLE_SPACES.replace_all(&result, " ").to_string();
        result.trim().to_string()
    }

    /// Aggressive normalization for equality comparison: strips articles,
    /// punctuation, and case.
    pub fn normalize_for_comparison(title: &str) -> String {
        let mut result = TRAILING_ARTICLE.replace(title, "").to_string();
        result = SEPARATORS.replace_all(&result, " ").to_string();
        result = result.replace('-', " ");
        result = PUNCTUATION.replace_all(&result, "").to_string();
        result = LEADING_ARTICLE.replace(&result, "").to_string();
        result = MULTIPLE_SPACES.replace_all(&result, " ").to_string();
        result.to_lowercase().trim().to_string()
    }

    /// Strips a trailing `(...)` group, typically a release year.
    pub fn remove_parenthetical(title: &str) -> String {
        PARENTHETICAL.replace(title, "").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(TitleNormalizer::normalize("Spider.Man"), "Spider Man");
        assert_eq!(TitleNormalizer::normalize("Spider_Man"), "Spider Man");
        assert_eq!(
            TitleNormalizer::normalize("  Multiple   Spaces  "),
            "Multiple Spaces"
        );
        assert_eq!(
            TitleNormalizer::normalize("Title - With - Dashes"),
            "Title With Dashes"
        );
    }

    #[test]
    fn test_normalize_for_comparison() {
        assert_eq!(
            TitleNormalizer::normalize_for_comparison("The Avengers"),
            "avengers"
        );
        assert_eq!(
            TitleNormalizer::normalize_for_comparison("Avengers, The"),
            "avengers"
        );
        assert_eq!(
            TitleNormalizer::normalize_for_comparison("Spider-Man: Homecoming"),
            "spider man homecoming"
        );
    }

    #[test]
    fn test_remove_parenthetical() {
        assert_eq!(
            TitleNormalizer::remove_parenthetical("The Matrix (1999)"),
            "The Matrix"
        );
        assert_eq!(
            TitleNormalizer::remove_parenthetical("Blade Runner (Director's Cut)"),
            "Blade Runner"
        );
    }
}
