//! Repository trait for the durable short link store.

use crate::domain::entities::{LinkCounts, NewShortLink, ResolvedLink, ShortLink};
use crate::domain::error::StoreError;
use async_trait::async_trait;

/// Durable store for short links.
///
/// The store is the source of truth for code uniqueness. Every operation is a
/// single statement; implementations bound each call with a deadline and
/// report overruns as [`StoreError::Timeout`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryShortLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Returns true if any row, expired or not, holds this code.
    async fn exists(&self, code: &str) -> Result<bool, StoreError>;

    /// Persists a new link with `expires_at = now + days`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the code is already present.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Reads the non-expired row for `code` together with the store's current time.
    ///
    /// Returns `Ok(None)` when no row matches or the row is already flagged expired.
    async fn resolve(&self, code: &str) -> Result<Option<ResolvedLink>, StoreError>;

    /// Flags the row as expired if its lifetime has ended. Idempotent.
    async fn mark_expired(&self, code: &str) -> Result<(), StoreError>;

    /// Deletes every row that is flagged expired or past its expiry time.
    ///
    /// Returns the number of rows removed.
    async fn delete_expired(&self) -> Result<u64, StoreError>;

    /// Reports total, active and expired row counts.
    async fn counts(&self) -> Result<LinkCounts, StoreError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
