//! Liveness probe.

/// `GET /ping` answers `pong` without touching any dependency.
pub async fn ping_handler() -> &'static str {
    "pong"
}
