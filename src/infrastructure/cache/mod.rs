//! Caching layer for fast code lookups and collision hints.
//!
//! [`HotCache`] is process-local and rebuilt from scratch on restart.

mod hot_cache;

pub use hot_cache::HotCache;
