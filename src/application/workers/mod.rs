//! Background tasks running independently of request handling.
//!
//! Each worker communicates with request handlers only through the shared
//! structure it mutates. None of them is drained on shutdown; every sweep is
//! idempotent.
//!
//! - [`expiry_sweeper`] - Deletes expired rows from the store
//! - [`cache_sweeper`] - Clears the hot cache
//! - [`idle_reclaimer`] - Drops idle rate-limiter clients

pub mod cache_sweeper;
pub mod expiry_sweeper;
pub mod idle_reclaimer;

pub use cache_sweeper::run_cache_sweeper;
pub use expiry_sweeper::{run_expiry_sweeper, sweep_expired};
pub use idle_reclaimer::run_idle_reclaimer;
