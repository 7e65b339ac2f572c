//! Durable persistence: SQLite-backed repository implementations.

pub mod sqlite;
