//! Application layer services and background workers.
//!
//! Services consume repository traits and the shared in-process structures
//! and provide a clean API for HTTP handlers.
//!
//! - [`services::IssuanceService`] - Short code issuance
//! - [`services::ResolutionService`] - Short code resolution
//! - [`workers`] - Expiry, cache and rate-limiter sweepers

pub mod services;
pub mod workers;
