//! Periodic full clear of the hot cache.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::info;

use crate::infrastructure::cache::HotCache;

/// Clears the whole cache every `period`, starting one period after launch.
pub async fn run_cache_sweeper(cache: Arc<HotCache>, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let dropped = cache.clear();
        info!("Cleared hot cache ({} entries)", dropped);
    }
}
