//! Rate-limited HTTP caller (C1)
//!
//! One shared `reqwest::Client` plus a per-host token bucket. Every caller
//! in the pipeline (metadata resolver, provider adapters, debrid client)
//! goes through here instead of dialing out directly.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{Quota, RateLimiter as GovernorLimiter};
use reqwest::Client;

use crate::shared::config::RateQuota;
use crate::shared::error::HttpError;

type TokenBucket = GovernorLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A `reqwest::Client` guarded by a `governor` token bucket.
pub struct RateLimitedClient {
    http: Client,
    bucket: TokenBucket,
    acquire_deadline: Duration,
}

impl RateLimitedClient {
    pub fn new(quota: RateQuota, acquire_deadline_secs: u64) -> Self {
        let rate = NonZeroU32::new(quota.rate.max(1)).unwrap();
        let burst = NonZeroU32::new(quota.burst.max(1)).unwrap();
        let bucket = GovernorLimiter::direct(Quota::per_second(rate).allow_burst(burst));

        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("reqwest client construction cannot fail with no custom TLS config"),
            bucket,
            acquire_deadline: Duration::from_secs(acquire_deadline_secs),
        }
    }

    async fn acquire(&self) -> Result<(), HttpError> {
        tokio::time::timeout(self.acquire_deadline, self.bucket.until_ready())
            .await
            .map_err(|_| HttpError::RateLimited)
    }

    /// GETs `url`, returning the raw body as bytes. `timeout` bounds the
    /// whole call including the rate-limiter wait.
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<bytes::Bytes, HttpError> {
        tokio::time::timeout(timeout, async {
            self.acquire().await?;
            let response = self.http.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(HttpError::Upstream(status.as_u16()));
            }
            Ok(response.bytes().await?)
        })
        .await
        .map_err(|_| HttpError::Timeout)?
    }

    /// POSTs a form body, returning the raw response bytes.
    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<bytes::Bytes, HttpError> {
        tokio::time::timeout(timeout, async {
            self.acquire().await?;
            let response = self.http.post(url).form(form).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(HttpError::Upstream(status.as_u16()));
            }
            Ok(response.bytes().await?)
        })
        .await
        .map_err(|_| HttpError::Timeout)?
    }
}
