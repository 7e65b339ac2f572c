//! Shared error types for the application
//!
//! This module defines all error types used across the application,
//! following domain-driven design principles. Layered so that each
//! component's error type converts into the ones above it; the pipeline
//! controller is the only place that ever turns an error into something a
//! caller observes (and only for `InvalidRequest`).

use thiserror::Error;

/// Domain errors - errors that occur in the domain layer
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Repository errors - errors that occur during data access
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                RepositoryError::Connection("Connection pool timeout".to_string())
            }
            sqlx::Error::PoolClosed => {
                RepositoryError::Connection("Connection pool closed".to_string())
            }
            other => RepositoryError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Errors from the rate-limited HTTP caller (C1), shared by every
/// component that makes outbound calls through it.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    #[error("upstream returned {0}")]
    Upstream(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("rate limit acquire timed out")]
    RateLimited,

    #[error("request deadline exceeded")]
    Timeout,
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout
        } else {
            HttpError::Network(err.to_string())
        }
    }
}

/// Metadata resolver (C3) errors.
#[derive(Debug, Clone, Error)]
pub enum ResolverError {
    #[error("no metadata found for this identifier")]
    NotFound,

    #[error("upstream error: {0}")]
    Upstream(#[from] HttpError),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("cache error: {0}")]
    Cache(#[from] RepositoryError),
}

/// Provider adapter (C5) errors. Always caught at the orchestrator
/// boundary and demoted to an empty result; never propagated further.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("upstream error: {0}")]
    Upstream(#[from] HttpError),

    #[error("response decoding failed: {0}")]
    Decode(String),

    #[error("cache error: {0}")]
    Cache(#[from] RepositoryError),
}

/// Debrid client (C8) errors.
#[derive(Debug, Clone, Error)]
pub enum DebridError {
    #[error("upstream error: {0}")]
    Upstream(#[from] HttpError),

    #[error("malformed API key")]
    InvalidAuth,

    #[error("candidate not ready after polling")]
    NotReady,

    #[error("ready magnet has no selectable file")]
    NoFiles,

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Pipeline controller (C9) errors. `InvalidRequest` is the only variant
/// ever surfaced past the HTTP boundary (as a 400); every other failure
/// the controller observes is demoted to "skip" or "return empty".
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] DomainError),
}
