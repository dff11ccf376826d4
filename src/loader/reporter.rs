use std::path::Path;

use serde::Serialize;

use crate::loader::{
    descriptor::discover,
    middleware::MiddlewareRegistry,
    planner::{plan_modules, Plan, RESERVED_PATHS},
    registry::ModuleRegistry,
    route_config::ResolvedRouteConfig,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub module: String,
    #[serde(flatten)]
    pub config: ResolvedRouteConfig,
}

/// Rescans the modules root and lists every module that would mount as configured
/// right now, using the same plan as the mounter.
pub fn module_info(
    root: &Path,
    registry: &ModuleRegistry,
    middleware: &MiddlewareRegistry,
) -> Vec<ModuleInfo> {
    let descriptors = match discover(root) {
        Ok(descriptors) => descriptors,
        Err(err) => {
            tracing::warn!(error = %err, "module scan failed");
            return Vec::new();
        }
    };

    plan_modules(&descriptors, registry, middleware, RESERVED_PATHS)
        .into_iter()
        .filter_map(|planned| match planned.plan {
            Plan::Ready(ready) => Some(ModuleInfo {
                module: planned.name,
                config: ready.config,
            }),
            Plan::Failed(err) => {
                tracing::debug!(module = %planned.name, error = %err, "skipping module in report");
                None
            }
            Plan::Disabled | Plan::MissingRoutes => None,
        })
        .collect()
}
