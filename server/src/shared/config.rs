//! Process configuration, loaded from the environment (`.env` via `dotenvy`
//! in development).

/// One provider's rate-limit quota: `rate` requests/sec, `burst` capacity.
#[derive(Debug, Clone, Copy)]
pub struct RateQuota {
    pub rate: u32,
    pub burst: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub database_path: String,
    pub tmdb_api_key: String,
    pub general_provider_base_url: String,
    pub french_provider_base_url: String,
    pub debrid_base_url: String,
    pub french_provider_quota: RateQuota,
    pub general_provider_quota: RateQuota,
    pub metadata_quota: RateQuota,
    pub debrid_quota: RateQuota,
    pub request_deadline_secs: u64,
    pub orchestrator_deadline_secs: u64,
    pub rate_limit_acquire_secs: u64,
    pub cache_capacity: usize,
    pub cache_sweep_interval_secs: u64,
    pub cleanup_interval_secs: u64,
    pub cleanup_retention_secs: u64,
}

impl Config {
    /// Loads configuration from the environment. `.env` is applied first
    /// (if present) and never overrides variables already set in the
    /// process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data.db".to_string()),
            tmdb_api_key: std::env::var("TMDB_API_KEY").unwrap_or_default(),
            general_provider_base_url: std::env::var("GENERAL_PROVIDER_BASE_URL")
                .unwrap_or_else(|_| "https://general-index.example".to_string()),
            french_provider_base_url: std::env::var("FRENCH_PROVIDER_BASE_URL")
                .unwrap_or_else(|_| "https://french-index.example".to_string()),
            debrid_base_url: std::env::var("DEBRID_BASE_URL")
                .unwrap_or_else(|_| "https://debrid.example/api".to_string()),
            french_provider_quota: RateQuota { rate: 10, burst: 2 },
            general_provider_quota: RateQuota { rate: 5, burst: 2 },
            metadata_quota: RateQuota { rate: 20, burst: 5 },
            debrid_quota: RateQuota { rate: 10, burst: 2 },
            request_deadline_secs: 30,
            orchestrator_deadline_secs: 15,
            rate_limit_acquire_secs: 5,
            cache_capacity: 1000,
            cache_sweep_interval_secs: 3600,
            cleanup_interval_secs: 3600,
            cleanup_retention_secs: 4 * 3600,
        })
    }
}
