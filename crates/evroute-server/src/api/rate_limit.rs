//! Per-IP request rate limiting.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::api::error::ErrorBody;

const WINDOW: Duration = Duration::from_secs(1);
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Sliding one-second window per client IP.
#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<DashMap<String, Vec<Instant>>>,
    last_cleanup: Arc<Mutex<Instant>>,
    max_rps: u32,
    enabled: bool,
    trust_proxy: bool,
}

impl RateLimiter {
    pub fn new(max_rps: u32, enabled: bool, trust_proxy: bool) -> Self {
        Self {
            requests: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
            max_rps,
            enabled,
            trust_proxy,
        }
    }

    /// Record a request from `ip`; false when it is over the limit.
    pub fn check(&self, ip: &str) -> bool {
        if !self.enabled {
            return true;
        }

        let now = Instant::now();
        if self.cleanup_due(now) {
            self.requests
                .retain(|_, stamps| stamps.iter().any(|t| now.duration_since(*t) < WINDOW));
        }

        let mut stamps = self.requests.entry(ip.to_string()).or_default();
        stamps.retain(|t| now.duration_since(*t) < WINDOW);
        if stamps.len() < self.max_rps as usize {
            stamps.push(now);
            true
        } else {
            false
        }
    }

    fn cleanup_due(&self, now: Instant) -> bool {
        let mut last_cleanup = self
            .last_cleanup
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if now.duration_since(*last_cleanup) >= CLEANUP_INTERVAL {
            *last_cleanup = now;
            true
        } else {
            false
        }
    }

    /// Client IP: first `X-Forwarded-For` hop when trusted, else the peer address.
    fn client_ip(&self, request: &Request) -> String {
        let forwarded = if self.trust_proxy {
            request
                .headers()
                .get("X-Forwarded-For")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.split(',').next())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        } else {
            None
        };

        forwarded
            .or_else(|| {
                request
                    .extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|info| info.0.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string())
    }
}

pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let ip = limiter.client_ip(&request);

    if limiter.check(&ip) {
        next.run(request).await
    } else {
        tracing::warn!(ip, "Rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorBody {
                error: "Rate limit exceeded, retry in 1 second".to_string(),
                code: "RATE_LIMITED".to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit_per_ip() {
        let limiter = RateLimiter::new(2, true, false);
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.2"));
    }

    #[test]
    fn window_slides() {
        let limiter = RateLimiter::new(1, true, false);
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        std::thread::sleep(WINDOW + Duration::from_millis(50));
        assert!(limiter.check("10.0.0.1"));
    }

    #[test]
    fn disabled_limiter_allows_everything() {
        let limiter = RateLimiter::new(1, false, false);
        for _ in 0..10 {
            assert!(limiter.check("10.0.0.1"));
        }
    }

    #[test]
    fn forwarded_for_only_when_trusted() {
        let request = || {
            axum::http::Request::builder()
                .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
                .body(axum::body::Body::empty())
                .unwrap()
        };

        let trusted = RateLimiter::new(1, true, true);
        assert_eq!(trusted.client_ip(&request()), "203.0.113.7");

        let untrusted = RateLimiter::new(1, true, false);
        assert_eq!(untrusted.client_ip(&request()), "unknown");
    }
}
