//! Periodic purge of expired short links from the store.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use crate::domain::repositories::ShortLinkRepository;

/// Deletes expired rows once, logging the outcome.
///
/// Returns the number of rows removed, or `None` if the store call failed.
pub async fn sweep_expired(repository: &dyn ShortLinkRepository) -> Option<u64> {
    match repository.delete_expired().await {
        Ok(rows) => {
            info!("Cleaned up {} expired short links", rows);
            Some(rows)
        }
        Err(e) => {
            error!("Error while cleaning up expired short links: {}", e);
            None
        }
    }
}

/// Runs [`sweep_expired`] immediately and then every `period`, forever.
///
/// Failures never stop the loop; the next tick simply retries.
pub async fn run_expiry_sweeper(repository: Arc<dyn ShortLinkRepository>, period: Duration) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        sweep_expired(repository.as_ref()).await;
    }
}
