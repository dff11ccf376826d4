//! Compile-time stand-in for loading route files at runtime.
//!
//! A module directory on disk carries the routes entry and config file; the
//! matching [`RouteModule`] registered here supplies the router behind it.

use std::sync::Arc;

use axum::Router;
use indexmap::IndexMap;

use crate::{
    api::auth::AuthGate,
    domain::traits::{DocumentStore, Entity},
    error::AppError,
    infra::{config::AppConfig, repos::memory::MemoryDatabase},
    loader::route_config::RouteConfigOverride,
};

/// Shared handles a module needs to assemble its router.
#[derive(Clone)]
pub struct ModuleContext {
    pub config: AppConfig,
    pub database: Arc<MemoryDatabase>,
    pub auth: AuthGate,
}

impl ModuleContext {
    pub fn store<T: Entity>(&self) -> Result<Arc<dyn DocumentStore<T>>, AppError> {
        let store: Arc<dyn DocumentStore<T>> = self.database.collection::<T>()?;
        Ok(store)
    }
}

pub trait RouteModule: Send + Sync {
    /// Directory name under the modules root.
    fn name(&self) -> &'static str;

    /// Config the module ships with; a `route.config.*` file still wins.
    fn describe(&self) -> RouteConfigOverride {
        RouteConfigOverride::default()
    }

    fn build_router(&self, ctx: &ModuleContext) -> Result<Router, AppError>;
}

#[derive(Default, Clone)]
pub struct ModuleRegistry {
    modules: IndexMap<&'static str, Arc<dyn RouteModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, module: impl RouteModule + 'static) -> Self {
        self.register(module);
        self
    }

    /// Later registrations under the same name replace earlier ones.
    pub fn register(&mut self, module: impl RouteModule + 'static) {
        let module: Arc<dyn RouteModule> = Arc::new(module);
        if self.modules.insert(module.name(), module.clone()).is_some() {
            tracing::warn!(module = module.name(), "route module registered twice");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn RouteModule>> {
        self.modules.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
