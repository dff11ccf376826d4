use std::{sync::Arc, time::Instant};

use axum::Router;

use crate::{
    api::auth::AuthGate,
    app::router::create_router,
    error::AppError,
    infra::{config::AppConfig, repos::memory::MemoryDatabase},
    loader::{middleware::MiddlewareRegistry, ModuleContext, ModuleRegistry, MountReport},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub database: Arc<MemoryDatabase>,
    pub registry: Arc<ModuleRegistry>,
    pub middleware: Arc<MiddlewareRegistry>,
    pub started_at: Instant,
}

pub fn build_app(
    config: AppConfig,
    registry: ModuleRegistry,
) -> Result<(Router, MountReport), AppError> {
    let database = Arc::new(MemoryDatabase::new(config.database_name.clone()));
    tracing::info!(database = database.name(), "document database ready");

    let auth = AuthGate::new(config.api_tokens.iter().cloned());
    if !auth.has_tokens() {
        tracing::warn!("API_TOKENS is empty; protected routes will refuse every request");
    }

    let ctx = ModuleContext {
        config: config.clone(),
        database: database.clone(),
        auth: auth.clone(),
    };
    let middleware = MiddlewareRegistry::with_builtins(auth);

    let state = AppState {
        config,
        database,
        registry: Arc::new(registry),
        middleware: Arc::new(middleware),
        started_at: Instant::now(),
    };

    Ok(create_router(state, &ctx))
}
