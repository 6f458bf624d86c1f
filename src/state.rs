//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{IssuanceService, LinkPolicy, ResolutionService};
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::cache::HotCache;
use crate::infrastructure::rate_limit::ClientRateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub issuance_service: Arc<IssuanceService>,
    pub resolution_service: Arc<ResolutionService>,
    pub repository: Arc<dyn ShortLinkRepository>,
    pub cache: Arc<HotCache>,
    pub rate_limiter: Arc<ClientRateLimiter>,
    /// Take client identity from proxy headers instead of the peer address.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires both engines over one repository and one hot cache.
    ///
    /// The cache and limiter are shared with the background sweepers, so
    /// callers keep their own `Arc` clones.
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        cache: Arc<HotCache>,
        rate_limiter: Arc<ClientRateLimiter>,
        policy: LinkPolicy,
        behind_proxy: bool,
    ) -> Self {
        let issuance_service = Arc::new(IssuanceService::new(
            repository.clone(),
            cache.clone(),
            policy,
        ));
        let resolution_service = Arc::new(ResolutionService::new(repository.clone(), cache.clone()));

        Self {
            issuance_service,
            resolution_service,
            repository,
            cache,
            rate_limiter,
            behind_proxy,
        }
    }
}
