//! In-process implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::entities::{LinkCounts, NewShortLink, ResolvedLink, ShortLink};
use crate::domain::error::StoreError;
use crate::domain::repositories::ShortLinkRepository;

/// Number of calls made to each repository operation.
#[derive(Debug, Default)]
struct CallCounts {
    exists: AtomicUsize,
    insert: AtomicUsize,
    resolve: AtomicUsize,
    mark_expired: AtomicUsize,
    delete_expired: AtomicUsize,
}

/// DashMap-backed repository with the same semantics as the PostgreSQL one.
///
/// Inserts go through the entry API, so the uniqueness check and the write
/// are one atomic step per code. Per-operation call counters let callers
/// observe store round-trips.
#[derive(Debug, Default)]
pub struct MemoryShortLinkRepository {
    rows: DashMap<String, ShortLink>,
    calls: CallCounts,
}

impl MemoryShortLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row with an explicit expiry, bypassing the uniqueness check.
    pub fn seed(&self, code: &str, target: &str, expires_at: DateTime<Utc>) {
        let link = ShortLink::new(
            code.to_string(),
            target.to_string(),
            Utc::now(),
            expires_at,
            false,
        );
        self.rows.insert(link.code.clone(), link);
    }

    /// Returns a snapshot of the row for `code`, expired or not.
    pub fn get(&self, code: &str) -> Option<ShortLink> {
        self.rows.get(code).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn exists_calls(&self) -> usize {
        self.calls.exists.load(Ordering::Relaxed)
    }

    pub fn insert_calls(&self) -> usize {
        self.calls.insert.load(Ordering::Relaxed)
    }

    pub fn resolve_calls(&self) -> usize {
        self.calls.resolve.load(Ordering::Relaxed)
    }

    pub fn mark_expired_calls(&self) -> usize {
        self.calls.mark_expired.load(Ordering::Relaxed)
    }

    pub fn delete_expired_calls(&self) -> usize {
        self.calls.delete_expired.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ShortLinkRepository for MemoryShortLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        self.calls.exists.fetch_add(1, Ordering::Relaxed);
        Ok(self.rows.contains_key(code))
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        self.calls.insert.fetch_add(1, Ordering::Relaxed);

        match self.rows.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::UniqueViolation),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let link = ShortLink::new(
                    new_link.code,
                    new_link.target,
                    now,
                    now + Duration::days(i64::from(new_link.days)),
                    false,
                );
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn resolve(&self, code: &str) -> Result<Option<ResolvedLink>, StoreError> {
        self.calls.resolve.fetch_add(1, Ordering::Relaxed);

        Ok(self
            .rows
            .get(code)
            .filter(|row| !row.expired)
            .map(|row| ResolvedLink {
                target: row.target.clone(),
                expires_at: row.expires_at,
                now: Utc::now(),
            }))
    }

    async fn mark_expired(&self, code: &str) -> Result<(), StoreError> {
        self.calls.mark_expired.fetch_add(1, Ordering::Relaxed);

        let now = Utc::now();
        if let Some(mut row) = self.rows.get_mut(code)
            && now > row.expires_at
        {
            row.expired = true;
        }

        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, StoreError> {
        self.calls.delete_expired.fetch_add(1, Ordering::Relaxed);

        let now = Utc::now();
        let before = self.rows.len();
        self.rows.retain(|_, row| !row.is_expired_at(now));

        Ok(before.saturating_sub(self.rows.len()) as u64)
    }

    async fn counts(&self) -> Result<LinkCounts, StoreError> {
        let now = Utc::now();
        let total = self.rows.len() as i64;
        let expired = self
            .rows
            .iter()
            .filter(|row| row.is_expired_at(now))
            .count() as i64;

        Ok(LinkCounts {
            total,
            active: total - expired,
            expired,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(code: &str, days: u32) -> NewShortLink {
        NewShortLink {
            code: code.to_string(),
            target: "https://example.com".to_string(),
            days,
        }
    }

    #[tokio::test]
    async fn test_insert_and_resolve() {
        let repo = MemoryShortLinkRepository::new();

        let link = repo.insert(new_link("abcd1234", 3)).await.unwrap();
        assert_eq!(link.code, "abcd1234");
        assert!(link.expires_at > link.created_at + Duration::days(2));

        let resolved = repo.resolve("abcd1234").await.unwrap().unwrap();
        assert_eq!(resolved.target, "https://example.com");
        assert!(!resolved.is_past_expiry());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_unique_violation() {
        let repo = MemoryShortLinkRepository::new();
        repo.insert(new_link("taken", 1)).await.unwrap();

        let err = repo.insert(new_link("taken", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation));
    }

    #[tokio::test]
    async fn test_exists_sees_expired_rows() {
        let repo = MemoryShortLinkRepository::new();
        repo.seed("stale", "https://old.com", Utc::now() - Duration::hours(1));

        assert!(repo.exists("stale").await.unwrap());
        assert!(!repo.exists("fresh").await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_expired_hides_row_from_resolve() {
        let repo = MemoryShortLinkRepository::new();
        repo.seed("stale", "https://old.com", Utc::now() - Duration::hours(1));

        repo.mark_expired("stale").await.unwrap();

        assert!(repo.get("stale").unwrap().expired);
        assert!(repo.resolve("stale").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_expired_ignores_live_rows() {
        let repo = MemoryShortLinkRepository::new();
        repo.insert(new_link("live", 1)).await.unwrap();

        repo.mark_expired("live").await.unwrap();

        assert!(!repo.get("live").unwrap().expired);
    }

    #[tokio::test]
    async fn test_delete_expired_counts_rows() {
        let repo = MemoryShortLinkRepository::new();
        repo.insert(new_link("live", 1)).await.unwrap();
        repo.seed("past", "https://old.com", Utc::now() - Duration::minutes(1));

        let counts = repo.counts().await.unwrap();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.expired, 1);

        assert_eq!(repo.delete_expired().await.unwrap(), 1);
        assert!(repo.get("past").is_none());
        assert!(repo.get("live").is_some());
        assert_eq!(repo.delete_expired_calls(), 1);
    }

    #[tokio::test]
    async fn test_delete_expired_removes_flagged_rows_before_deadline() {
        let repo = MemoryShortLinkRepository::new();
        repo.insert(new_link("flagged", 7)).await.unwrap();
        repo.insert(new_link("live", 7)).await.unwrap();
        if let Some(mut row) = repo.rows.get_mut("flagged") {
            row.expired = true;
        }

        assert_eq!(repo.counts().await.unwrap().expired, 1);
        assert_eq!(repo.delete_expired().await.unwrap(), 1);
        assert!(repo.get("flagged").is_none());
        assert!(!repo.exists("flagged").await.unwrap());
        assert!(repo.get("live").is_some());
    }
}
