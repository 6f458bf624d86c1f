//! Short link entity representing a code → target binding.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// The `code` stays reserved until the row is physically deleted, even after
/// `expired` has been set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub expired: bool,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        code: String,
        target: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        expired: bool,
    ) -> Self {
        Self {
            code,
            target,
            created_at,
            expires_at,
            expired,
        }
    }

    /// Returns true if the link is flagged expired or its lifetime has ended at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expired || now > self.expires_at
    }
}

/// Input data for persisting a new short link.
///
/// `expires_at` is computed by the store as its own `now + days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub code: String,
    pub target: String,
    pub days: u32,
}

/// A live row read back from the store together with the store's clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub target: String,
    pub expires_at: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

impl ResolvedLink {
    /// Returns true if the store's clock has moved past the expiry time.
    pub fn is_past_expiry(&self) -> bool {
        self.now > self.expires_at
    }
}

/// Row counts reported by the store for operators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkCounts {
    pub total: i64,
    pub active: i64,
    pub expired: i64,
}
