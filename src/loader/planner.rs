//! Decides, for every discovered module, whether and where it mounts.
//!
//! The mounter and the health reporter both go through [`plan_modules`], so the
//! modules listed by `/api/health` are exactly the ones serving requests.

use std::sync::Arc;

use crate::{
    error::AppError,
    loader::{
        descriptor::ModuleDescriptor,
        middleware::{MiddlewareRegistry, RequestMiddleware},
        registry::{ModuleRegistry, RouteModule},
        route_config::{resolve, ResolvedRouteConfig},
    },
};

/// Application paths no module may claim or overlap.
pub const RESERVED_PATHS: &[&str] = &["/api/health", "/api-docs"];

pub struct ReadyModule {
    pub module: Arc<dyn RouteModule>,
    pub config: ResolvedRouteConfig,
    pub chain: Vec<Arc<dyn RequestMiddleware>>,
}

pub enum Plan {
    Ready(ReadyModule),
    Disabled,
    MissingRoutes,
    Failed(AppError),
}

pub struct PlannedModule {
    pub name: String,
    pub plan: Plan,
}

/// Walks `descriptors` in order, claiming each ready module's path so later
/// modules that equal or overlap it (or a reserved path) fail.
pub fn plan_modules(
    descriptors: &[ModuleDescriptor],
    registry: &ModuleRegistry,
    middleware: &MiddlewareRegistry,
    reserved: &[&str],
) -> Vec<PlannedModule> {
    let mut claimed: Vec<String> = Vec::new();
    descriptors
        .iter()
        .map(|descriptor| {
            let plan = if !descriptor.has_routes_entry() {
                Plan::MissingRoutes
            } else {
                match plan_one(descriptor, registry, middleware, reserved, &claimed) {
                    Ok(Some(ready)) => {
                        claimed.push(ready.config.path.clone());
                        Plan::Ready(ready)
                    }
                    Ok(None) => Plan::Disabled,
                    Err(err) => Plan::Failed(err),
                }
            };
            PlannedModule {
                name: descriptor.name.clone(),
                plan,
            }
        })
        .collect()
}

fn plan_one(
    descriptor: &ModuleDescriptor,
    registry: &ModuleRegistry,
    middleware: &MiddlewareRegistry,
    reserved: &[&str],
    claimed: &[String],
) -> Result<Option<ReadyModule>, AppError> {
    let module = registry.get(&descriptor.name).ok_or_else(|| {
        AppError::ModuleLoad(format!(
            "no route module registered for {}",
            descriptor.name
        ))
    })?;

    let config = resolve(descriptor, Some(module.describe()))?;
    if !config.enabled {
        return Ok(None);
    }

    if let Some(taken) = reserved
        .iter()
        .copied()
        .chain(claimed.iter().map(String::as_str))
        .find(|taken| paths_overlap(taken, &config.path))
    {
        return Err(AppError::ModuleLoad(format!(
            "path {} overlaps {taken}",
            config.path
        )));
    }

    let chain = middleware.resolve(config.middleware.as_deref().unwrap_or_default())?;
    Ok(Some(ReadyModule {
        module,
        config,
        chain,
    }))
}

/// True when one path equals the other or sits below it on a segment boundary.
pub fn paths_overlap(a: &str, b: &str) -> bool {
    let below = |inner: &str, outer: &str| {
        inner
            .strip_prefix(outer)
            .is_some_and(|rest| rest.starts_with('/'))
    };
    a == b || below(a, b) || below(b, a)
}
