//! End-to-end test of the pipeline controller: parses an id, resolves
//! metadata, fans out to providers, ranks candidates, drives a candidate
//! through the debrid service, and returns a direct link. Every external
//! port (metadata resolver, provider adapter, debrid client) is a fake;
//! only the SQLite cache/magnet repositories are real.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use streamd::application::{ResolveStreamUseCase, SearchOrchestrator};
use streamd::domain::entities::{
    CandidateSet, ExternalId, FileLink, MediaInfo, PollResult, Readiness, TorrentCandidate,
};
use streamd::infrastructure::database::initialize_schema;
use streamd::interfaces::external_services::{DebridClient, MetadataResolver, ProviderAdapter};
use streamd::shared::error::{DebridError, PipelineError, ProviderError, ResolverError};
use torrent_identifier::{parse as parse_torrent_name, RequestKind, Resolution};

struct FakeMetadataResolver {
    info: MediaInfo,
}

#[async_trait]
impl MetadataResolver for FakeMetadataResolver {
    async fn resolve(&self, _ext_id: &ExternalId, _kind_hint: Option<RequestKind>) -> Result<MediaInfo, ResolverError> {
        Ok(self.info.clone())
    }
}

struct NotFoundMetadataResolver;

#[async_trait]
impl MetadataResolver for NotFoundMetadataResolver {
    async fn resolve(&self, _ext_id: &ExternalId, _kind_hint: Option<RequestKind>) -> Result<MediaInfo, ResolverError> {
        Err(ResolverError::NotFound)
    }
}

struct FakeProvider {
    id: &'static str,
    title: &'static str,
    infohash: &'static str,
}

#[async_trait]
impl ProviderAdapter for FakeProvider {
    fn provider_id(&self) -> &str {
        self.id
    }

    async fn search(
        &self,
        _query: &str,
        kind: RequestKind,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Result<CandidateSet, ProviderError> {
        let parsed = parse_torrent_name(self.title, kind, season, episode);
        let mut set = CandidateSet::new();
        set.insert(TorrentCandidate::new(
            self.id,
            "internal-1",
            self.title,
            Some(self.infohash.to_string()),
            4 * 1024 * 1024 * 1024,
            parsed,
        ));
        Ok(set)
    }

    async fn search_specific_episode(
        &self,
        query: &str,
        kind: RequestKind,
        season: u32,
        episode: u32,
    ) -> Result<CandidateSet, ProviderError> {
        self.search(query, kind, Some(season), Some(episode)).await
    }

    async fn fetch_infohash(&self, _provider_internal_id: &str) -> Result<String, ProviderError> {
        Ok(self.infohash.to_string())
    }
}

struct EmptyProvider {
    id: &'static str,
}

#[async_trait]
impl ProviderAdapter for EmptyProvider {
    fn provider_id(&self) -> &str {
        self.id
    }

    async fn search(&self, _query: &str, _kind: RequestKind, _season: Option<u32>, _episode: Option<u32>) -> Result<CandidateSet, ProviderError> {
        Ok(CandidateSet::new())
    }

    async fn search_specific_episode(&self, _query: &str, _kind: RequestKind, _season: u32, _episode: u32) -> Result<CandidateSet, ProviderError> {
        Ok(CandidateSet::new())
    }

    async fn fetch_infohash(&self, _provider_internal_id: &str) -> Result<String, ProviderError> {
        Ok(String::new())
    }
}

/// Ready on the first poll, so the pipeline's spaced retry loop never has
/// to sleep between attempts.
struct FakeDebridClient {
    infohash: &'static str,
    file_path: &'static str,
    submitted: Mutex<Vec<String>>,
}

#[async_trait]
impl DebridClient for FakeDebridClient {
    async fn submit(&self, infohash: &str, _label: &str, _api_key: &str) -> Result<String, DebridError> {
        self.submitted.lock().unwrap().push(infohash.to_string());
        Ok("debrid-id-1".to_string())
    }

    async fn poll(&self, infohashes: &[String], _api_key: &str) -> Result<Vec<PollResult>, DebridError> {
        Ok(infohashes
            .iter()
            .filter(|h| h.as_str() == self.infohash)
            .map(|h| PollResult {
                infohash: h.clone(),
                readiness: Readiness::Ready,
                size_bytes: 4 * 1024 * 1024 * 1024,
                files: Some(vec![FileLink {
                    path: self.file_path.to_string(),
                    size_bytes: 4 * 1024 * 1024 * 1024,
                    link: "opaque-link-1".to_string(),
                }]),
            })
            .collect())
    }

    async fn unlock(&self, _opaque_file_url: &str, _api_key: &str) -> Result<String, DebridError> {
        Ok("https://debrid.example/direct/movie.mkv".to_string())
    }

    async fn delete(&self, _debrid_id: &str, _api_key: &str) -> Result<(), DebridError> {
        Ok(())
    }
}

struct RejectingDebridClient;

#[async_trait]
impl DebridClient for RejectingDebridClient {
    async fn submit(&self, _infohash: &str, _label: &str, _api_key: &str) -> Result<String, DebridError> {
        Err(DebridError::InvalidAuth)
    }

    async fn poll(&self, _infohashes: &[String], _api_key: &str) -> Result<Vec<PollResult>, DebridError> {
        Ok(Vec::new())
    }

    async fn unlock(&self, _opaque_file_url: &str, _api_key: &str) -> Result<String, DebridError> {
        Err(DebridError::InvalidAuth)
    }

    async fn delete(&self, _debrid_id: &str, _api_key: &str) -> Result<(), DebridError> {
        Ok(())
    }
}

#[tokio::test]
async fn resolves_a_movie_to_a_direct_stream_link() {
    let info = MediaInfo::new(RequestKind::Movie, "Movie Title", Some(2020), "en");
    let resolver = Arc::new(FakeMetadataResolver { info });

    let general: Arc<dyn ProviderAdapter> = Arc::new(FakeProvider {
        id: "general",
        title: "Movie.Title.2020.1080p.BluRay.x264-GROUP",
        infohash: "abc123infohash",
    });
    let french: Arc<dyn ProviderAdapter> = Arc::new(EmptyProvider { id: "french" });
    let orchestrator = Arc::new(SearchOrchestrator::new(general.clone(), french, 5));

    let debrid = Arc::new(FakeDebridClient {
        infohash: "abc123infohash",
        file_path: "Movie.Title.2020.1080p.BluRay.x264-GROUP.mkv",
        submitted: Mutex::new(Vec::new()),
    });

    let use_case = ResolveStreamUseCase::new(resolver, orchestrator, debrid.clone(), vec![general], 30);

    let streams = use_case
        .execute("tt1234567", "caller-api-key-0123456789", &[Resolution::R1080p, Resolution::R720p])
        .await
        .unwrap();

    assert_eq!(streams.len(), 1);
    assert_eq!(streams[0].name, "general");
    assert_eq!(streams[0].url, "https://debrid.example/direct/movie.mkv");
    assert!(streams[0].title.contains("Movie.Title.2020.1080p.BluRay.x264-GROUP"));
    assert_eq!(debrid.submitted.lock().unwrap().as_slice(), ["abc123infohash"]);
}

#[tokio::test]
async fn unparseable_id_surfaces_as_a_pipeline_error() {
    let resolver = Arc::new(NotFoundMetadataResolver);
    let general: Arc<dyn ProviderAdapter> = Arc::new(EmptyProvider { id: "general" });
    let french: Arc<dyn ProviderAdapter> = Arc::new(EmptyProvider { id: "french" });
    let orchestrator = Arc::new(SearchOrchestrator::new(general.clone(), french, 5));
    let debrid = Arc::new(RejectingDebridClient);

    let use_case = ResolveStreamUseCase::new(resolver, orchestrator, debrid, vec![general], 30);

    let result = use_case.execute("not-a-valid-id", "caller-api-key-0123456789", &[]).await;
    assert!(matches!(result, Err(PipelineError::InvalidRequest(_))));
}

#[tokio::test]
async fn metadata_miss_yields_an_empty_stream_list_not_an_error() {
    let resolver = Arc::new(NotFoundMetadataResolver);
    let general: Arc<dyn ProviderAdapter> = Arc::new(EmptyProvider { id: "general" });
    let french: Arc<dyn ProviderAdapter> = Arc::new(EmptyProvider { id: "french" });
    let orchestrator = Arc::new(SearchOrchestrator::new(general.clone(), french, 5));
    let debrid = Arc::new(RejectingDebridClient);

    let use_case = ResolveStreamUseCase::new(resolver, orchestrator, debrid, vec![general], 30);

    let streams = use_case.execute("tt1234567", "caller-api-key-0123456789", &[]).await.unwrap();
    assert!(streams.is_empty());
}

/// Confirms the real SQLite schema can back the durable repositories a real
/// debrid client would write submission bookkeeping into, alongside a
/// fake-driven pipeline run. The pipeline itself never touches the database
/// when every port is faked; this just proves the two are wireable
/// together.
#[tokio::test]
async fn schema_initializes_cleanly_alongside_a_fake_driven_pipeline_run() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite pool");
    initialize_schema(&pool).await.expect("schema init failed");

    let info = MediaInfo::new(RequestKind::Series, "Show Title", Some(2019), "en");
    let resolver = Arc::new(FakeMetadataResolver { info });
    let general: Arc<dyn ProviderAdapter> = Arc::new(FakeProvider {
        id: "general",
        title: "Show.Title.S01E02.1080p.WEB.x264-GROUP",
        infohash: "episodehash",
    });
    let french: Arc<dyn ProviderAdapter> = Arc::new(EmptyProvider { id: "french" });
    let orchestrator = Arc::new(SearchOrchestrator::new(general.clone(), french, 5));
    let debrid = Arc::new(FakeDebridClient {
        infohash: "episodehash",
        file_path: "Show.Title.S01E02.1080p.WEB.x264-GROUP.mkv",
        submitted: Mutex::new(Vec::new()),
    });

    let use_case = ResolveStreamUseCase::new(resolver, orchestrator, debrid, vec![general], 30);
    let streams = use_case.execute("tt7654321:1:2", "caller-api-key-0123456789", &[]).await.unwrap();
    assert_eq!(streams.len(), 1);

    pool.close().await;
}
