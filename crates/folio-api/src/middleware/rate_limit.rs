//! Token bucket rate limiter middleware.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use folio_core::config::RateLimitConfig;
use folio_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// In-memory token bucket per client key.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Client key → bucket state.
    inner: Arc<Mutex<Buckets>>,
    /// Whether requests are throttled at all.
    enabled: bool,
    /// Maximum tokens per bucket.
    capacity: f64,
    /// Token refill rate per second.
    refill_rate: f64,
    /// Buckets untouched this long are dropped.
    idle_eviction: Duration,
}

#[derive(Debug)]
struct Buckets {
    by_key: HashMap<String, TokenBucket>,
    last_sweep: Instant,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Creates a limiter allowing `burst` requests at once, refilled at `refill_rate` per second.
    pub fn new(burst: u32, refill_rate: f64, idle_eviction: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Buckets {
                by_key: HashMap::new(),
                last_sweep: Instant::now(),
            })),
            enabled: true,
            capacity: f64::from(burst.max(1)),
            refill_rate,
            idle_eviction,
        }
    }

    /// Creates a limiter from configuration.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        let mut limiter = Self::new(
            config.burst,
            config.requests_per_second,
            Duration::from_secs(config.idle_eviction_seconds),
        );
        limiter.enabled = config.enabled;
        limiter
    }

    /// Attempts to consume a token for `key`.
    pub async fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now()).await
    }

    /// [`check`](Self::check) at an explicit instant.
    pub async fn check_at(&self, key: &str, now: Instant) -> bool {
        if !self.enabled {
            return true;
        }

        let mut state = self.inner.lock().await;

        if now.saturating_duration_since(state.last_sweep) >= self.idle_eviction {
            let before = state.by_key.len();
            let idle = self.idle_eviction;
            state
                .by_key
                .retain(|_, bucket| now.saturating_duration_since(bucket.last_refill) < idle);
            state.last_sweep = now;
            let evicted = before - state.by_key.len();
            if evicted > 0 {
                debug!(evicted, "Evicted idle rate limit buckets");
            }
        }

        let capacity = self.capacity;
        let bucket = state
            .by_key
            .entry(key.to_string())
            .or_insert(TokenBucket {
                tokens: capacity,
                last_refill: now,
            });

        let elapsed = now.saturating_duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_rate).min(capacity);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Number of tracked client buckets.
    pub async fn tracked_clients(&self) -> usize {
        self.inner.lock().await.by_key.len()
    }
}

/// Client key: first `X-Forwarded-For` hop, else the peer address, else `"unknown"`.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rejects requests from clients whose bucket is empty.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(request.headers(), peer);

    if !state.rate_limiter.check(&key).await {
        warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
        return ApiError(AppError::rate_limited("Too many requests")).into_response();
    }

    next.run(request).await
}
