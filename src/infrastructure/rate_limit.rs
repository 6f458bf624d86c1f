//! Per-client admission control using a token bucket.

use dashmap::DashMap;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

const DEFAULT_BURST: NonZeroU32 = NonZeroU32::new(4).unwrap();
const DEFAULT_PER_SECOND: NonZeroU32 = NonZeroU32::new(1).unwrap();

/// Token bucket parameters and idle-client threshold.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    /// Bucket capacity; a new client starts full.
    pub burst: NonZeroU32,
    /// Steady refill rate in tokens per second.
    pub per_second: NonZeroU32,
    /// Clients unseen for longer than this are reclaimed.
    pub idle_after: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            burst: DEFAULT_BURST,
            per_second: DEFAULT_PER_SECOND,
            idle_after: Duration::from_secs(300),
        }
    }
}

/// Outcome of [`ClientRateLimiter::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Denied,
}

impl Admission {
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }
}

struct ClientState {
    limiter: DefaultDirectRateLimiter,
    last_seen: Instant,
}

/// Table of token buckets keyed by client identity.
///
/// A bucket is created on first contact through the map's entry API, which
/// holds the shard lock, so simultaneous first requests from one client share
/// a single bucket. Reclamation of idle clients is a separate call
/// ([`ClientRateLimiter::reclaim_idle`]) driven by a background task.
pub struct ClientRateLimiter {
    clients: DashMap<String, ClientState>,
    quota: Quota,
    idle_after: Duration,
}

impl ClientRateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            clients: DashMap::new(),
            quota: Quota::per_second(policy.per_second).allow_burst(policy.burst),
            idle_after: policy.idle_after,
        }
    }

    /// Tries to take one token from `client`'s bucket.
    ///
    /// `last_seen` is refreshed whether or not the request is admitted.
    pub fn admit(&self, client: &str) -> Admission {
        self.admit_at(client, Instant::now())
    }

    fn admit_at(&self, client: &str, now: Instant) -> Admission {
        let mut state = self
            .clients
            .entry(client.to_owned())
            .or_insert_with(|| ClientState {
                limiter: RateLimiter::direct(self.quota),
                last_seen: now,
            });

        state.last_seen = now;

        match state.limiter.check() {
            Ok(()) => Admission::Allowed,
            Err(_) => Admission::Denied,
        }
    }

    /// Drops clients idle for longer than the configured threshold.
    ///
    /// Returns the number of clients removed.
    pub fn reclaim_idle(&self) -> usize {
        self.reclaim_idle_at(Instant::now())
    }

    /// Same as [`Self::reclaim_idle`] with an explicit reference instant.
    pub fn reclaim_idle_at(&self, now: Instant) -> usize {
        let before = self.clients.len();
        self.clients
            .retain(|_, state| now.saturating_duration_since(state.last_seen) <= self.idle_after);
        before.saturating_sub(self.clients.len())
    }

    /// Number of clients currently holding a bucket.
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}
