//! Middleware de Rate Limiting
//!
//! Ventana fija por IP de cliente: `x-forwarded-for` detrás de un proxy,
//! si no la dirección del peer (`ConnectInfo`).

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::EnvironmentConfig;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Contador de requests de una IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado global del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self::with_limits(config.rate_limit_requests, Duration::from_secs(config.rate_limit_window))
    }

    pub fn with_limits(max_requests: u32, window_duration: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration,
        }
    }

    /// Cuenta una request de `ip`; `false` si supera el límite
    pub async fn check_rate_limit(&self, ip: &str) -> bool {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if info.requests >= self.max_requests {
            return false;
        }

        info.requests += 1;
        true
    }
}

/// Middleware de rate limiting
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request);

    if !state.rate_limit.check_rate_limit(&ip).await {
        warn!("🚦 Rate limit superado para {}", ip);
        return Err(AppError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

fn client_ip(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_per_ip() {
        let state = RateLimitState::with_limits(2, Duration::from_secs(60));
        assert!(state.check_rate_limit("10.0.0.1").await);
        assert!(state.check_rate_limit("10.0.0.1").await);
        assert!(!state.check_rate_limit("10.0.0.1").await);
        assert!(state.check_rate_limit("10.0.0.2").await);
    }

    fn request_from(peer: &str, forwarded: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/health");
        if let Some(forwarded) = forwarded {
            builder = builder.header("x-forwarded-for", forwarded);
        }
        let mut request = builder.body(axum::body::Body::empty()).unwrap();
        let addr: SocketAddr = peer.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        request
    }

    #[test]
    fn test_client_ip_sources() {
        assert_eq!(client_ip(&request_from("192.168.1.20:51000", None)), "192.168.1.20");
        assert_eq!(
            client_ip(&request_from("10.0.0.1:443", Some("203.0.113.9, 10.0.0.1"))),
            "203.0.113.9"
        );

        let bare = axum::http::Request::builder().body(axum::body::Body::empty()).unwrap();
        assert_eq!(client_ip(&bare), "unknown");
    }

    #[tokio::test]
    async fn test_window_resets() {
        let state = RateLimitState::with_limits(1, Duration::from_millis(20));
        assert!(state.check_rate_limit("10.0.0.1").await);
        assert!(!state.check_rate_limit("10.0.0.1").await);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(state.check_rate_limit("10.0.0.1").await);
    }
}
