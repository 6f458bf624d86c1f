//! Short code resolution service.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::error::LinkError;
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::cache::HotCache;

/// Service resolving short codes to their target URLs.
///
/// Cache hits are trusted without a freshness check; the cache sweeper bounds
/// how long a logically expired entry can keep resolving.
pub struct ResolutionService {
    repository: Arc<dyn ShortLinkRepository>,
    cache: Arc<HotCache>,
}

impl ResolutionService {
    /// Creates a new resolution service.
    pub fn new(repository: Arc<dyn ShortLinkRepository>, cache: Arc<HotCache>) -> Self {
        Self { repository, cache }
    }

    /// Returns the target URL bound to `code`.
    ///
    /// On a cache miss the store is read; a row whose expiry has passed by the
    /// store's clock is flagged expired and reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no live link matches.
    /// Returns [`LinkError::Storage`] on store failures.
    pub async fn resolve(&self, code: &str) -> Result<String, LinkError> {
        if let Some(target) = self.cache.get(code) {
            debug!("Cache HIT for {}", code);
            return Ok(target);
        }

        debug!("Cache MISS for {}", code);

        let not_found = || LinkError::NotFound {
            code: code.to_string(),
        };

        let Some(row) = self.repository.resolve(code).await? else {
            return Err(not_found());
        };

        if row.is_past_expiry() {
            if let Err(e) = self.repository.mark_expired(code).await {
                warn!("Failed to mark {} expired: {}", code, e);
            }
            return Err(not_found());
        }

        self.cache.put(code, &row.target);

        Ok(row.target)
    }
}
