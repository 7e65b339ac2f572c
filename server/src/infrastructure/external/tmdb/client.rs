//! TMDB Metadata Resolver Implementation (C3)
//!
//! Resolves an external identifier to [`MediaInfo`] via two lookup paths:
//! IMDB ids through TMDB's `/find` endpoint, TMDB ids through the typed
//! movie/tv endpoint (probing movie first when the kind is unknown).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::entities::{ExternalId, MediaInfo};
use crate::domain::repositories::CacheRepository;
use crate::infrastructure::external::tmdb::dto::{
    TmdbFindResponse, TmdbMovieDetailResponse, TmdbTvDetailResponse,
};
use crate::infrastructure::http::RateLimitedClient;
use crate::interfaces::external_services::MetadataResolver;
use crate::shared::error::{HttpError, ResolverError};
use torrent_identifier::RequestKind;

const META_TTL_SECS: u64 = 24 * 3600;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TmdbMetadataResolver {
    api_key: String,
    base_url: String,
    http: Arc<RateLimitedClient>,
    cache: Arc<dyn CacheRepository>,
}

impl TmdbMetadataResolver {
    pub fn new(api_key: impl Into<String>, http: Arc<RateLimitedClient>, cache: Arc<dyn CacheRepository>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            http,
            cache,
        }
    }

    fn authed_url(&self, path: &str) -> String {
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}api_key={}", self.base_url, path, separator, self.api_key)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let bytes = self.http.get(&self.authed_url(path), REQUEST_TIMEOUT).await?;
        serde_json::from_slice(&bytes).map_err(|e| HttpError::Network(e.to_string()))
    }

    fn extract_year(date: Option<&str>) -> Option<u32> {
        date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
    }

    async fn resolve_imdb(&self, tt: &str) -> Result<MediaInfo, ResolverError> {
        let path = format!("/find/{tt}?external_source=imdb_id");
        let response: TmdbFindResponse = self.get_json(&path).await?;

        if let Some(m) = response.movie_results.into_iter().next() {
            return Ok(MediaInfo::new(
                RequestKind::Movie,
                m.title,
                Self::extract_year(m.release_date.as_deref()),
                m.original_language,
            ));
        }
        if let Some(t) = response.tv_results.into_iter().next() {
            return Ok(MediaInfo::new(
                RequestKind::Series,
                t.name,
                Self::extract_year(t.first_air_date.as_deref()),
                t.original_language,
            ));
        }
        Err(ResolverError::NotFound)
    }

    async fn resolve_tmdb_movie(&self, id: i64) -> Result<MediaInfo, ResolverError> {
        let detail: TmdbMovieDetailResponse = self.get_json(&format!("/movie/{id}")).await?;
        Ok(MediaInfo::new(
            RequestKind::Movie,
            detail.title,
            Self::extract_year(detail.release_date.as_deref()),
            detail.original_language,
        ))
    }

    async fn resolve_tmdb_tv(&self, id: i64) -> Result<MediaInfo, ResolverError> {
        let detail: TmdbTvDetailResponse = self.get_json(&format!("/tv/{id}")).await?;
        Ok(MediaInfo::new(
            RequestKind::Series,
            detail.name,
            Self::extract_year(detail.first_air_date.as_deref()),
            detail.original_language,
        ))
    }
}

#[async_trait]
impl MetadataResolver for TmdbMetadataResolver {
    async fn resolve(
        &self,
        ext_id: &ExternalId,
        kind_hint: Option<RequestKind>,
    ) -> Result<MediaInfo, ResolverError> {
        let cache_key = match ext_id {
            ExternalId::Imdb(tt) => format!("meta:{tt}"),
            ExternalId::Tmdb(id) => format!("meta:tmdb:{id}"),
        };

        if let Ok(Some(cached)) = self.cache.get(&cache_key).await {
            if let Ok(info) = serde_json::from_str::<MediaInfo>(&cached) {
                return Ok(info);
            }
        }

        let info = match ext_id {
            ExternalId::Imdb(tt) => self.resolve_imdb(tt).await?,
            ExternalId::Tmdb(id) => match kind_hint {
                Some(RequestKind::Movie) => self.resolve_tmdb_movie(*id).await?,
                Some(RequestKind::Series) => self.resolve_tmdb_tv(*id).await?,
                None => match self.resolve_tmdb_movie(*id).await {
                    Ok(info) => info,
                    Err(_) => self.resolve_tmdb_tv(*id).await?,
                },
            },
        };

        if let Ok(value) = serde_json::to_string(&info) {
            if let Err(err) = self.cache.put(&cache_key, &value, META_TTL_SECS).await {
                warn!(%cache_key, %err, "failed to cache resolved metadata");
            }
        }

        Ok(info)
    }
}
