mod application;
mod domain;
mod infrastructure;
mod interfaces;
mod presentation;
mod shared;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::application::{CleanupWorker, ResolveStreamUseCase, SearchOrchestrator};
use crate::infrastructure::cache::{InMemoryCache, MultiLevelCache};
use crate::infrastructure::database::{initialize_schema, ConnectionPool, ConnectionPoolConfig};
use crate::infrastructure::external::{
    FrenchProviderAdapter, GeneralProviderAdapter, RealDebridClient, TmdbMetadataResolver,
};
use crate::infrastructure::http::RateLimitedClient;
use crate::infrastructure::persistence::sqlite::{SqliteCacheRepository, SqliteMagnetRepository};
use crate::interfaces::external_services::ProviderAdapter;
use crate::presentation::http::build_router;
use crate::shared::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let level = config.log_level.parse().unwrap_or(tracing::Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let pool_config = ConnectionPoolConfig::new(format!("sqlite:{}?mode=rwc", config.database_path));
    let connection_pool = ConnectionPool::create(pool_config)
        .await
        .map_err(|e| anyhow::anyhow!("failed to create connection pool: {e}"))?;
    let pool = connection_pool.inner().clone();
    initialize_schema(&pool).await?;
    info!("database initialized");

    let cache_repo = Arc::new(SqliteCacheRepository::new(pool.clone()));
    let magnet_repo = Arc::new(SqliteMagnetRepository::new(pool.clone()));
    let l1 = Arc::new(InMemoryCache::new(config.cache_capacity));
    let cache: Arc<MultiLevelCache> = Arc::new(MultiLevelCache::new(l1.clone(), cache_repo, 6 * 3600));

    let metadata_http = Arc::new(RateLimitedClient::new(config.metadata_quota, config.rate_limit_acquire_secs));
    let general_http = Arc::new(RateLimitedClient::new(config.general_provider_quota, config.rate_limit_acquire_secs));
    let french_http = Arc::new(RateLimitedClient::new(config.french_provider_quota, config.rate_limit_acquire_secs));
    let debrid_http = Arc::new(RateLimitedClient::new(config.debrid_quota, config.rate_limit_acquire_secs));

    let metadata_resolver = Arc::new(TmdbMetadataResolver::new(
        config.tmdb_api_key.clone(),
        metadata_http,
        cache.clone(),
    ));

    let general_provider: Arc<dyn ProviderAdapter> = Arc::new(GeneralProviderAdapter::new(
        "general",
        config.general_provider_base_url.clone(),
        general_http,
        cache.clone(),
    ));
    let french_provider: Arc<dyn ProviderAdapter> = Arc::new(FrenchProviderAdapter::new(
        "french",
        config.french_provider_base_url.clone(),
        french_http,
        cache.clone(),
    ));

    let search_orchestrator = Arc::new(SearchOrchestrator::new(
        general_provider.clone(),
        french_provider.clone(),
        config.orchestrator_deadline_secs,
    ));

    let debrid = Arc::new(RealDebridClient::new(
        config.debrid_base_url.clone(),
        debrid_http,
        magnet_repo.clone(),
    ));

    let resolve_stream = Arc::new(ResolveStreamUseCase::new(
        metadata_resolver,
        search_orchestrator,
        debrid.clone(),
        vec![general_provider, french_provider],
        config.request_deadline_secs,
    ));

    let cleanup_worker = Arc::new(CleanupWorker::new(magnet_repo, debrid, config.cleanup_retention_secs));
    tokio::spawn(cleanup_worker.run_forever(config.cleanup_interval_secs));

    let sweep_interval_secs = config.cache_sweep_interval_secs;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(sweep_interval_secs));
        loop {
            ticker.tick().await;
            let evicted = l1.sweep_expired();
            if evicted > 0 {
                info!(evicted, "swept expired in-memory cache entries");
            }
        }
    });

    let app = build_router(resolve_stream);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("server listening on {addr}");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
