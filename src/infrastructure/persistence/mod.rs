//! Short link repository implementations.
//!
//! - [`PgShortLinkRepository`] - PostgreSQL storage via SQLx
//! - [`MemoryShortLinkRepository`] - In-process storage with call counters

pub mod memory_short_link_repository;
pub mod pg_short_link_repository;

pub use memory_short_link_repository::MemoryShortLinkRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
