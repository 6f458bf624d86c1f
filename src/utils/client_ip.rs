//! Client identity extraction for per-client rate limiting.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Headers consulted, in order, when running behind a trusted proxy.
const PROXY_HEADERS: [&str; 3] = ["fly-client-ip", "x-forwarded-for", "x-real-ip"];

/// Key used when no peer address is known.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derives the rate-limit key for a request.
///
/// When `behind_proxy` is set, the first proxy header carrying a value wins
/// (for `X-Forwarded-For` the left-most entry). Otherwise, or when no header
/// is present, the socket peer IP is used.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = PROXY_HEADERS.iter().find_map(|name| {
            headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        });

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("10.0.0.7:51234".parse().unwrap())
    }

    #[test]
    fn test_uses_peer_ip_by_default() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("1.2.3.4"));

        assert_eq!(client_key(&headers, peer(), false), "10.0.0.7");
    }

    #[test]
    fn test_prefers_fly_header_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("fly-client-ip", HeaderValue::from_static("9.9.9.9"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("1.2.3.4"));

        assert_eq!(client_key(&headers, peer(), true), "9.9.9.9");
    }

    #[test]
    fn test_takes_leftmost_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("1.2.3.4, 10.0.0.1"),
        );

        assert_eq!(client_key(&headers, peer(), true), "1.2.3.4");
    }

    #[test]
    fn test_falls_back_to_peer_then_unknown() {
        let headers = HeaderMap::new();

        assert_eq!(client_key(&headers, peer(), true), "10.0.0.7");
        assert_eq!(client_key(&headers, None, true), UNKNOWN_CLIENT);
    }
}
