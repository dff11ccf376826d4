use std::{collections::HashMap, sync::Arc, time::Instant};

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::{header::CACHE_CONTROL, HeaderValue, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};

use crate::{api::auth::AuthGate, error::AppError};

/// Per-module request hook, referenced by name from a module's `middleware` list.
#[async_trait]
pub trait RequestMiddleware: Send + Sync {
    async fn handle(&self, module: &str, request: Request<Body>, next: Next<Body>) -> Response;
}

pub struct RequireAuth(pub AuthGate);

#[async_trait]
impl RequestMiddleware for RequireAuth {
    async fn handle(&self, _module: &str, request: Request<Body>, next: Next<Body>) -> Response {
        match self.0.authorize(request.headers()) {
            Ok(()) => next.run(request).await,
            Err(err) => err.into_response(),
        }
    }
}

pub struct RequestLog;

#[async_trait]
impl RequestMiddleware for RequestLog {
    async fn handle(&self, module: &str, request: Request<Body>, next: Next<Body>) -> Response {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let started = Instant::now();
        let response = next.run(request).await;
        tracing::info!(
            module,
            %method,
            path = %path,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "module request"
        );
        response
    }
}

pub struct NoStore;

#[async_trait]
impl RequestMiddleware for NoStore {
    async fn handle(&self, _module: &str, request: Request<Body>, next: Next<Body>) -> Response {
        let mut response = next.run(request).await;
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response
    }
}

#[derive(Clone, Default)]
pub struct MiddlewareRegistry {
    entries: HashMap<String, Arc<dyn RequestMiddleware>>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins(auth: AuthGate) -> Self {
        let mut registry = Self::new();
        registry.register("auth", RequireAuth(auth));
        registry.register("request-log", RequestLog);
        registry.register("no-store", NoStore);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, middleware: impl RequestMiddleware + 'static) {
        self.entries.insert(name.into(), Arc::new(middleware));
    }

    /// Looks every name up, preserving order. The first unknown name fails the lot.
    pub fn resolve(&self, names: &[String]) -> Result<Vec<Arc<dyn RequestMiddleware>>, AppError> {
        names
            .iter()
            .map(|name| {
                self.entries
                    .get(name)
                    .cloned()
                    .ok_or_else(|| AppError::ModuleLoad(format!("unknown middleware {name:?}")))
            })
            .collect()
    }
}

#[derive(Clone)]
struct Bound {
    module: Arc<str>,
    middleware: Arc<dyn RequestMiddleware>,
}

async fn run_bound(State(bound): State<Bound>, request: Request<Body>, next: Next<Body>) -> Response {
    bound.middleware.handle(&bound.module, request, next).await
}

/// Wraps `router` so that `chain[0]` sees the request first.
pub fn wrap(router: Router, module: &str, chain: Vec<Arc<dyn RequestMiddleware>>) -> Router {
    let module: Arc<str> = Arc::from(module);
    chain.into_iter().rev().fold(router, |router, inner| {
        let bound = Bound {
            module: module.clone(),
            middleware: inner,
        };
        router.layer(middleware::from_fn_with_state(bound, run_bound))
    })
}
