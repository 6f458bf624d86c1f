mod common;

use chrono::{Duration, Utc};
use std::sync::Arc;
use shortcode_service::application::services::{
    IssuanceService, IssueRequest, LinkPolicy, ResolutionService,
};
use shortcode_service::domain::LinkError;
use shortcode_service::infrastructure::cache::HotCache;
use shortcode_service::infrastructure::persistence::MemoryShortLinkRepository;

struct Engines {
    issuance: IssuanceService,
    resolution: ResolutionService,
    repo: Arc<MemoryShortLinkRepository>,
    cache: Arc<HotCache>,
}

fn engines() -> Engines {
    let repo = Arc::new(MemoryShortLinkRepository::new());
    let cache = Arc::new(HotCache::new());

    Engines {
        issuance: IssuanceService::new(repo.clone(), cache.clone(), LinkPolicy::default()),
        resolution: ResolutionService::new(repo.clone(), cache.clone()),
        repo,
        cache,
    }
}

#[tokio::test]
async fn test_issued_code_resolves_to_target() {
    let e = engines();

    let link = e
        .issuance
        .issue(IssueRequest {
            target: "https://example.com/?q=1&r=2".to_string(),
            days: 7,
            custom_code: None,
        })
        .await
        .unwrap();

    let target = e.resolution.resolve(&link.code).await.unwrap();

    assert_eq!(target, "https://example.com/?q=1&r=2");
}

#[tokio::test]
async fn test_cache_hit_skips_store() {
    let e = engines();
    e.repo.seed("cached", "https://example.com", Utc::now() + Duration::days(1));

    assert_eq!(e.resolution.resolve("cached").await.unwrap(), "https://example.com");
    assert_eq!(e.resolution.resolve("cached").await.unwrap(), "https://example.com");

    assert_eq!(e.repo.resolve_calls(), 1);
}

#[tokio::test]
async fn test_cache_clear_forces_store_round_trip() {
    let e = engines();
    e.repo.seed("cached", "https://example.com", Utc::now() + Duration::days(1));

    e.resolution.resolve("cached").await.unwrap();
    e.cache.clear();
    e.resolution.resolve("cached").await.unwrap();

    assert_eq!(e.repo.resolve_calls(), 2);
}

#[tokio::test]
async fn test_expired_row_is_flagged_and_not_found() {
    let e = engines();
    common::seed_expired(&e.repo, "stale", "https://stale.example");

    let result = e.resolution.resolve("stale").await;

    assert!(matches!(result, Err(LinkError::NotFound { code }) if code == "stale"));
    assert!(e.repo.get("stale").unwrap().expired);
    assert_eq!(e.repo.mark_expired_calls(), 1);
    assert!(e.cache.get("stale").is_none());
}

#[tokio::test]
async fn test_flagged_row_is_not_found_without_marking_again() {
    let e = engines();
    common::seed_expired(&e.repo, "stale", "https://stale.example");

    let _ = e.resolution.resolve("stale").await;
    let second = e.resolution.resolve("stale").await;

    assert!(matches!(second, Err(LinkError::NotFound { .. })));
    assert_eq!(e.repo.mark_expired_calls(), 1);
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let e = engines();

    let result = e.resolution.resolve("nothing").await;

    assert!(matches!(result, Err(LinkError::NotFound { .. })));
}

#[tokio::test]
async fn test_cached_entry_is_trusted_past_expiry() {
    let e = engines();
    e.cache.put("ghost", "https://ghost.example");
    common::seed_expired(&e.repo, "ghost", "https://ghost.example");

    assert_eq!(e.resolution.resolve("ghost").await.unwrap(), "https://ghost.example");
    assert_eq!(e.repo.resolve_calls(), 0);
}
