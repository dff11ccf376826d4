use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, cors::CorsLayer,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::{
    api::{
        self,
        errors::{handle_panic, route_not_found},
    },
    app::bootstrap::AppState,
    loader::{
        mount_modules,
        rate_limit::{self, RateLimiter},
        ModuleContext, MountReport, RESERVED_PATHS,
    },
};

/// Baseline hardening headers, added only when a handler did not set its own.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("content-security-policy", "default-src 'self';base-uri 'self';font-src 'self' https: data:;form-action 'self';frame-ancestors 'self';img-src 'self' data:;object-src 'none';script-src 'self';script-src-attr 'none';style-src 'self' https: 'unsafe-inline';upgrade-insecure-requests"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

pub fn create_router(state: AppState, ctx: &ModuleContext) -> (Router, MountReport) {
    let config = state.config.clone();
    let registry = state.registry.clone();
    let middleware = state.middleware.clone();

    let base = Router::new()
        .route("/api/health", get(api::health::health))
        .route("/api-docs/openapi.json", get(api::health::openapi))
        .with_state(state);

    let (app, report) = mount_modules(
        base,
        &config.modules_dir,
        &registry,
        &middleware,
        ctx,
        RESERVED_PATHS,
    );

    let mut app = app.fallback(route_not_found);
    if let Some(limiter) = RateLimiter::global(config.rate_limit_window_ms, config.rate_limit_max) {
        app = rate_limit::apply(app, Arc::new(limiter));
    }

    let app = SECURITY_HEADERS.iter().fold(app, |app, &(name, value)| {
        app.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    });

    let app = app
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    (app, report)
}
