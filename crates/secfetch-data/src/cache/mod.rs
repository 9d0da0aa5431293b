//! Caching layer for ticker mappings.

pub mod cached;
pub mod sqlite;

pub use cached::{CachedSource, DEFAULT_TTL_DAYS};
pub use sqlite::{CacheStats, TickerCache};
