mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_ping() {
    let ctx = common::create_test_context();
    let server = common::test_server(ctx.state);

    let response = server.get("/ping").await;

    response.assert_status_ok();
    response.assert_text("pong");
}

#[tokio::test]
async fn test_health_reports_components() {
    let ctx = common::create_test_context();
    ctx.cache.put("abcd", "https://example.com");
    let server = common::test_server(ctx.state);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["message"], "1 entries");
    assert_eq!(json["checks"]["rate_limiter"]["status"], "ok");
}

#[tokio::test]
async fn test_static_routes_are_not_codes() {
    let ctx = common::create_test_context();
    let server = common::test_server(ctx.state);

    server.get("/health").await.assert_status(StatusCode::OK);
    assert_eq!(ctx.repo.resolve_calls(), 0);
}
