//! Infrastructure layer for storage and in-process state.
//!
//! - [`cache`] - Process-local hot cache
//! - [`persistence`] - Short link repository implementations
//! - [`rate_limit`] - Per-client token bucket table

pub mod cache;
pub mod persistence;
pub mod rate_limit;
