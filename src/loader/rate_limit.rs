use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header::RETRY_AFTER, HeaderMap, HeaderValue, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use parking_lot::Mutex;

use crate::{error::AppError, loader::route_config::RateLimitConfig};

pub const DEFAULT_WINDOW_MS: u64 = 15 * 60 * 1000;
pub const DEFAULT_MAX: u32 = 100;
pub const GLOBAL_MESSAGE: &str = "Too many requests from this IP, please try again later.";

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
/// Swept whenever the client table grows past this many keys.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

/// Fixed-window request counter keyed by client address.
#[derive(Debug)]
pub struct RateLimiter {
    scope: Option<String>,
    window: Duration,
    max: u32,
    message: String,
    clients: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max: u32, message: impl Into<String>) -> Self {
        Self {
            scope: None,
            window,
            max,
            message: message.into(),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Only requests whose path starts with `prefix` are counted.
    pub fn scoped(mut self, prefix: impl Into<String>) -> Self {
        self.scope = Some(prefix.into());
        self
    }

    pub fn for_module(module: &str, config: &RateLimitConfig) -> Self {
        Self::new(
            Duration::from_millis(config.window_ms.unwrap_or(DEFAULT_WINDOW_MS)),
            config.max.unwrap_or(DEFAULT_MAX),
            config
                .message
                .clone()
                .unwrap_or_else(|| format!("Too many requests to {module} API")),
        )
    }

    /// App-wide limiter for `/api/`; `None` when `max` is zero.
    pub fn global(window_ms: u64, max: u32) -> Option<Self> {
        if max == 0 || window_ms == 0 {
            return None;
        }
        Some(Self::new(Duration::from_millis(window_ms), max, GLOBAL_MESSAGE).scoped("/api/"))
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn applies_to(&self, path: &str) -> bool {
        self.scope
            .as_deref()
            .map_or(true, |prefix| path.starts_with(prefix))
    }

    pub fn check_at(&self, key: &str, now: Instant) -> Decision {
        let mut clients = self.clients.lock();
        if clients.len() > SWEEP_THRESHOLD {
            let window = self.window;
            clients.retain(|_, entry| now.duration_since(entry.started) < window);
        }

        let entry = clients.entry(key.to_string()).or_insert(Window {
            started: now,
            hits: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                hits: 0,
            };
        }

        if entry.hits >= self.max {
            let elapsed = now.duration_since(entry.started);
            return Decision::Limited {
                retry_after: self.window.saturating_sub(elapsed),
            };
        }
        entry.hits += 1;
        Decision::Allowed {
            remaining: self.max - entry.hits,
        }
    }

    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }
}

/// Peer address when the server recorded one, else the first forwarded hop.
pub fn client_key<B>(request: &Request<B>) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    forwarded_for(request.headers()).unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .map(str::trim)
        .find(|hop| !hop.is_empty())
        .map(str::to_string)
}

async fn enforce(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next<Body>,
) -> Response {
    if !limiter.applies_to(request.uri().path()) {
        return next.run(request).await;
    }

    let key = client_key(&request);
    match limiter.check(&key) {
        Decision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(LIMIT_HEADER, HeaderValue::from(limiter.max()));
            headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
            response
        }
        Decision::Limited { retry_after } => {
            tracing::warn!(client = %key, "rate limit exceeded");
            let mut response = AppError::RateLimited(limiter.message.clone()).into_response();
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            let headers = response.headers_mut();
            headers.insert(RETRY_AFTER, HeaderValue::from(secs));
            headers.insert(LIMIT_HEADER, HeaderValue::from(limiter.max()));
            headers.insert(REMAINING_HEADER, HeaderValue::from(0u32));
            response
        }
    }
}

pub fn apply(router: Router, limiter: Arc<RateLimiter>) -> Router {
    router.layer(middleware::from_fn_with_state(limiter, enforce))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_resets_after_expiry() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 2, "slow down");
        let t0 = Instant::now();
        assert_eq!(limiter.check_at("a", t0), Decision::Allowed { remaining: 1 });
        assert_eq!(limiter.check_at("a", t0), Decision::Allowed { remaining: 0 });
        assert!(matches!(
            limiter.check_at("a", t0 + Duration::from_secs(10)),
            Decision::Limited { retry_after } if retry_after == Duration::from_secs(50)
        ));
        // other clients have their own window
        assert_eq!(limiter.check_at("b", t0), Decision::Allowed { remaining: 1 });
        assert_eq!(
            limiter.check_at("a", t0 + Duration::from_secs(60)),
            Decision::Allowed { remaining: 1 }
        );
    }

    #[test]
    fn module_limiter_fills_missing_fields() {
        let limiter = RateLimiter::for_module(
            "equipment",
            &RateLimitConfig {
                max: Some(3),
                ..RateLimitConfig::default()
            },
        );
        assert_eq!(limiter.max(), 3);
        assert_eq!(limiter.window, Duration::from_millis(DEFAULT_WINDOW_MS));
        assert_eq!(limiter.message, "Too many requests to equipment API");
    }

    #[test]
    fn global_limiter_is_scoped_and_optional() {
        assert!(RateLimiter::global(1000, 0).is_none());
        let limiter = RateLimiter::global(1000, 5).unwrap();
        assert!(limiter.applies_to("/api/categories"));
        assert!(!limiter.applies_to("/api-docs/openapi.json"));
    }

    #[test]
    fn client_key_prefers_forwarded_header_without_peer() {
        let request = Request::builder()
            .header("x-forwarded-for", "10.0.0.7, 172.16.0.1")
            .body(())
            .unwrap();
        assert_eq!(client_key(&request), "10.0.0.7");

        let request = Request::builder().body(()).unwrap();
        assert_eq!(client_key(&request), "unknown");
    }
}
