#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::num::NonZeroU32;
use std::sync::Arc;
use shortcode_service::application::services::LinkPolicy;
use shortcode_service::infrastructure::cache::HotCache;
use shortcode_service::infrastructure::persistence::MemoryShortLinkRepository;
use shortcode_service::infrastructure::rate_limit::{ClientRateLimiter, RateLimitPolicy};
use shortcode_service::routes::build_router;
use shortcode_service::state::AppState;

/// Everything a test needs to poke at besides the state itself.
pub struct TestContext {
    pub state: AppState,
    pub repo: Arc<MemoryShortLinkRepository>,
    pub cache: Arc<HotCache>,
}

/// Rate limit generous enough that functional tests never hit it.
pub fn relaxed_rate_limit() -> RateLimitPolicy {
    RateLimitPolicy {
        burst: NonZeroU32::new(1_000).unwrap(),
        ..RateLimitPolicy::default()
    }
}

pub fn create_test_context() -> TestContext {
    create_test_context_with(relaxed_rate_limit(), false)
}

pub fn create_test_context_with(rate_limit: RateLimitPolicy, behind_proxy: bool) -> TestContext {
    let repo = Arc::new(MemoryShortLinkRepository::new());
    let cache = Arc::new(HotCache::new());
    let limiter = Arc::new(ClientRateLimiter::new(rate_limit));

    let state = AppState::new(
        repo.clone(),
        cache.clone(),
        limiter,
        LinkPolicy::default(),
        behind_proxy,
    );

    TestContext { state, repo, cache }
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).unwrap()
}

/// Seeds a link whose lifetime ended an hour ago.
pub fn seed_expired(repo: &MemoryShortLinkRepository, code: &str, target: &str) {
    repo.seed(code, target, Utc::now() - Duration::hours(1));
}

pub async fn insert_pg_link(pool: &PgPool, code: &str, target: &str, expires_in: &str) {
    sqlx::query(
        "INSERT INTO short_links (code, target, expires_at) VALUES ($1, $2, NOW() + $3::interval)",
    )
    .bind(code)
    .bind(target)
    .bind(expires_in)
    .execute(pool)
    .await
    .unwrap();
}
