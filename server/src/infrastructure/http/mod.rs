//! Shared HTTP plumbing (C1): rate-limited outbound calls.

pub mod rate_limited_client;

pub use rate_limited_client::RateLimitedClient;
