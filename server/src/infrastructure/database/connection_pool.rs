//! Database Connection Pool
//!
//! Provides optimized connection pooling for SQLite with:
//! - Configurable pool size
//! - Connection timeout
//! - Connection validation

use sqlx::{Pool, Sqlite, sqlite::SqliteConnectOptions, pool::PoolOptions};
use std::time::Duration;
use std::str::FromStr;
use tracing::{info, debug};

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct ConnectionPoolConfig {
    /// Database connection string
    pub database_url: String,
    /// Maximum number of connections in pool (default: 10)
    pub max_connections: u32,
    /// Minimum number of connections to maintain (default: 2)
    pub min_connections: u32,
    /// Connection timeout in seconds (default: 30)
    pub connection_timeout_secs: u64,
    /// Idle connection timeout in seconds (default: 600)
    pub idle_timeout_secs: u64,
    /// Maximum connection lifetime in seconds (default: 3600)
    pub max_lifetime_secs: u64,
    /// Whether to test connections on checkout (default: true)
    pub test_on_checkout: bool,
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 2,
            connection_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 3600,
            test_on_checkout: true,
        }
    }
}

impl ConnectionPoolConfig {
    /// Creates a new connection pool configuration
    ///
    /// # Arguments
    /// * `database_url` - Database connection string
    pub fn new(database_url: String) -> Self {
        Self {
            database_url,
            ..Default::default()
        }
    }

    /// Sets maximum pool size
    ///
    /// # Arguments
    /// * `max` - Maximum number of connections
    ///
    /// # Note
    /// Should be based on expected concurrent operations
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    /// Sets minimum pool size
    ///
    /// # Arguments
    /// * `min` - Minimum number of connections to maintain
    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets connection timeout
    ///
    /// # Arguments
    /// * `timeout_secs` - Timeout in seconds
    pub fn with_connection_timeout(mut self, timeout_secs: u64) -> Self {
        self.connection_timeout_secs = timeout_secs;
        self
    }

    /// Sets idle connection timeout
    ///
    /// # Arguments
    /// * `timeout_secs` - Timeout in seconds
    pub fn with_idle_timeout(mut self, timeout_secs: u64) -> Self {
        self.idle_timeout_secs = timeout_secs;
        self
    }

    /// Sets maximum connection lifetime
    ///
    /// # Arguments
    /// * `lifetime_secs` - Maximum lifetime in seconds
    pub fn with_max_lifetime(mut self, lifetime_secs: u64) -> Self {
        self.max_lifetime_secs = lifetime_secs;
        self
    }

    /// Enables or disables connection testing on checkout
    ///
    /// # Arguments
    /// * `enabled` - Whether to test connections
    pub fn with_test_on_checkout(mut self, enabled: bool) -> Self {
        self.test_on_checkout = enabled;
        self
    }

    /// Validates configuration
    ///
    /// # Returns
    /// * `Result<(), String>` - Ok if valid, error message otherwise
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        if self.max_connections < self.min_connections {
            return Err(format!(
                "Max connections ({}) must be >= min connections ({})",
                self.max_connections, self.min_connections
            ));
        }

        if self.max_connections > 100 {
            return Err("Max connections cannot exceed 100".to_string());
        }

        Ok(())
    }
}

/// Database connection pool
pub struct ConnectionPool {
    /// Underlying SQLx pool
    pool: Pool<Sqlite>,
    /// Pool configuration
    config: ConnectionPoolConfig,
}

impl ConnectionPool {
    /// Creates a new connection pool
    ///
    /// # Arguments
    /// * `config` - Pool configuration
    ///
    /// # Returns
    /// * `Result<Self, String>` - Pool or error message
    ///
    /// # Errors
    /// Returns error if:
    /// - Configuration is invalid
    /// - Database connection fails
    pub async fn create(config: ConnectionPoolConfig) -> Result<Self, String> {
        // Validate configuration
        config.validate()?;

        info!(
            "Creating connection pool: max={}, min={}, timeout={}s",
            config.max_connections,
            config.min_connections,
            config.connection_timeout_secs
        );

        // Build connection options
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| format!("Invalid database URL: {}", e))?
            .create_if_missing(true);

        // Configure SQLite pragmas for performance
        let options = options
            .pragma("journal_mode", "WAL") // Write-Ahead Logging for better concurrency
            .pragma("synchronous", "NORMAL") // Balance between safety and performance
            .pragma("cache_size", "-64000") // 64MB cache
            .pragma("temp_store", "MEMORY") // Store temporary tables in memory
            .pragma("mmap_size", "268435456") // 256MB memory-mapped I/O
            .pragma("page_size", "4096"); // 4KB page size (matches filesystem)

        // Create pool with sqlx 0.8 API
        let pool = PoolOptions::<Sqlite>::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .test_before_acquire(config.test_on_checkout)
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to create connection pool: {}", e))?;

        info!("Connection pool created successfully");

        Ok(Self { pool, config })
    }

    /// Creates connection pool from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: Database connection string (required)
    /// - `DB_MAX_CONNECTIONS`: Maximum pool size (default: 10)
    /// - `DB_MIN_CONNECTIONS`: Minimum pool size (default: 2)
    /// - `DB_CONNECTION_TIMEOUT`: Connection timeout in seconds (default: 30)
    /// - `DB_IDLE_TIMEOUT`: Idle timeout in seconds (default: 600)
    /// - `DB_MAX_LIFETIME`: Max connection lifetime in seconds (default: 3600)
    ///
    /// # Returns
    /// * `Result<Self, String>` - Pool or error message
    pub async fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:data.db?mode=rwc".to_string());

        let mut config = ConnectionPoolConfig::new(database_url);

        if let Ok(max) = std::env::var("DB_MAX_CONNECTIONS") {
            if let Ok(val) = max.parse::<u32>() {
                config = config.with_max_connections(val);
            }
        }

        if let Ok(min) = std::env::var("DB_MIN_CONNECTIONS") {
            if let Ok(val) = min.parse::<u32>() {
                config = config.with_min_connections(val);
            }
        }

        if let Ok(timeout) = std::env::var("DB_CONNECTION_TIMEOUT") {
            if let Ok(val) = timeout.parse::<u64>() {
                config = config.with_connection_timeout(val);
            }
        }

        if let Ok(timeout) = std::env::var("DB_IDLE_TIMEOUT") {
            if let Ok(val) = timeout.parse::<u64>() {
                config = config.with_idle_timeout(val);
            }
        }

        if let Ok(lifetime) = std::env::var("DB_MAX_LIFETIME") {
            if let Ok(val) = lifetime.parse::<u64>() {
                config = config.with_max_lifetime(val);
            }
        }

        Self::create(config).await
    }

    /// Gets the underlying SQLx pool
    pub fn inner(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Gets the configuration the pool was created with
    pub fn config(&self) -> &ConnectionPoolConfig {
        &self.config
    }

    /// Closes the connection pool
    ///
    /// # Returns
    /// * `Result<(), sqlx::Error>` - Success or error
    pub async fn close(self) -> Result<(), sqlx::Error> {
        info!("Closing connection pool");
        self.pool.close().await;
        Ok(())
    }
}

impl Drop for ConnectionPool {
    fn drop(&mut self) {
        debug!("ConnectionPool dropped");
    }
}
