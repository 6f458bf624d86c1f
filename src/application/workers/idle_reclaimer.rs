//! Periodic reclamation of idle rate-limiter clients.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use crate::infrastructure::rate_limit::ClientRateLimiter;

/// Drops idle client buckets every `period`, starting one period after launch.
pub async fn run_idle_reclaimer(limiter: Arc<ClientRateLimiter>, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let removed = limiter.reclaim_idle();
        debug!(
            "Reclaimed {} idle rate-limit clients, {} remain",
            removed,
            limiter.tracked_clients()
        );
    }
}
