//! Database Infrastructure
//!
//! Provides database connection pooling and management.
//!
//! # Modules
//! - `connection_pool`: Connection pool configuration and creation
//! - `schema`: Database schema initialization

pub mod connection_pool;
pub mod schema;

pub use connection_pool::{ConnectionPool, ConnectionPoolConfig};
pub use schema::initialize_schema;
