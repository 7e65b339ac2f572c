// Caching Layer
//
// Two-tier cache: in-memory LRU (L1) plus a durable K/V store (L2, see
// persistence::sqlite), combined by MultiLevelCache.

pub mod in_memory_cache;
pub mod multi_level_cache;

pub use in_memory_cache::InMemoryCache;
pub use multi_level_cache::MultiLevelCache;
