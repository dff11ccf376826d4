use std::{path::Path, sync::Arc};

use axum::Router;

use crate::{
    api::errors::route_not_found,
    error::AppError,
    loader::{
        descriptor::discover,
        middleware::{self, MiddlewareRegistry},
        planner::{plan_modules, Plan, ReadyModule},
        rate_limit::{self, RateLimiter},
        registry::{ModuleContext, ModuleRegistry},
        route_config::ResolvedRouteConfig,
    },
};

const MODULE_WIDTH: usize = 15;
const ROUTE_WIDTH: usize = 26;
const DESCRIPTION_WIDTH: usize = 35;
const VERSION_WIDTH: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatus {
    Loaded(ResolvedRouteConfig),
    Disabled,
    MissingRoutes,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedModule {
    pub name: String,
    pub status: ModuleStatus,
}

#[derive(Debug, Clone, Default)]
pub struct MountReport {
    pub modules: Vec<MountedModule>,
}

impl MountReport {
    pub fn loaded(&self) -> impl Iterator<Item = (&str, &ResolvedRouteConfig)> {
        self.modules.iter().filter_map(|module| match &module.status {
            ModuleStatus::Loaded(config) => Some((module.name.as_str(), config)),
            _ => None,
        })
    }

    pub fn status_of(&self, name: &str) -> Option<&ModuleStatus> {
        self.modules
            .iter()
            .find(|module| module.name == name)
            .map(|module| &module.status)
    }
}

/// Mounts every discovered module onto `app`. A module that fails is logged and
/// skipped; it never prevents its siblings from loading.
pub fn mount_modules(
    mut app: Router,
    root: &Path,
    registry: &ModuleRegistry,
    middleware: &MiddlewareRegistry,
    ctx: &ModuleContext,
    reserved: &[&str],
) -> (Router, MountReport) {
    let mut report = MountReport::default();

    let descriptors = match discover(root) {
        Ok(descriptors) => descriptors,
        Err(err) => {
            tracing::error!(error = %err, "module discovery failed");
            return (app, report);
        }
    };
    if !descriptors.is_empty() {
        let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
        tracing::info!(modules = %names.join(", "), "discovering modules");
    }

    for name in registry.names() {
        if !descriptors.iter().any(|d| d.name == name) {
            tracing::warn!(module = name, root = %root.display(), "registered module has no directory");
        }
    }

    for planned in plan_modules(&descriptors, registry, middleware, reserved) {
        let name = planned.name;
        let status = match planned.plan {
            Plan::MissingRoutes => {
                tracing::warn!(module = %name, "no routes file found");
                ModuleStatus::MissingRoutes
            }
            Plan::Disabled => {
                tracing::info!(module = %name, "module is disabled");
                ModuleStatus::Disabled
            }
            Plan::Failed(err) => {
                tracing::error!(module = %name, error = %err, "error loading module");
                ModuleStatus::Failed(err.to_string())
            }
            Plan::Ready(ready) => match assemble(&name, ready, ctx) {
                Ok((router, config)) => {
                    tracing::info!(
                        module = %name,
                        path = %config.path,
                        version = %config.version,
                        "module mounted"
                    );
                    app = app.nest(&config.path, router);
                    ModuleStatus::Loaded(config)
                }
                Err(err) => {
                    tracing::error!(module = %name, error = %err, "error building module router");
                    ModuleStatus::Failed(err.to_string())
                }
            },
        };
        report.modules.push(MountedModule { name, status });
    }

    for line in render_summary(&report) {
        tracing::info!("{line}");
    }

    (app, report)
}

/// Builds the module router and layers it as limiter -> middleware -> routes.
/// The fallback is set first so unmatched paths under the mount point pass
/// through the same layers.
fn assemble(
    name: &str,
    ready: ReadyModule,
    ctx: &ModuleContext,
) -> Result<(Router, ResolvedRouteConfig), AppError> {
    let router = ready.module.build_router(ctx)?.fallback(route_not_found);
    let mut router = middleware::wrap(router, name, ready.chain);
    if let Some(limit) = &ready.config.rate_limit {
        let limiter = RateLimiter::for_module(name, limit);
        router = rate_limit::apply(router, Arc::new(limiter));
    }
    Ok((router, ready.config))
}

/// Box-drawn table of loaded modules; empty when nothing loaded.
pub fn render_summary(report: &MountReport) -> Vec<String> {
    let rows: Vec<_> = report.loaded().collect();
    if rows.is_empty() {
        return Vec::new();
    }

    let border = |left: char, mid: char, right: char| {
        let cells: Vec<String> = [MODULE_WIDTH, ROUTE_WIDTH, DESCRIPTION_WIDTH, VERSION_WIDTH]
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        format!("{left}{}{right}", cells.join(&mid.to_string()))
    };
    let row = |module: &str, route: &str, description: &str, version: &str| {
        format!(
            "│ {} │ {} │ {} │ {} │",
            pad(module, MODULE_WIDTH),
            pad(route, ROUTE_WIDTH),
            pad(description, DESCRIPTION_WIDTH),
            pad(version, VERSION_WIDTH),
        )
    };

    let mut lines = vec![
        "Loaded Modules:".to_string(),
        border('┌', '┬', '┐'),
        row("Module", "Route", "Description", "Version"),
        border('├', '┼', '┤'),
    ];
    for (name, config) in rows {
        lines.push(row(
            name,
            &config.path,
            &truncate(&config.description, DESCRIPTION_WIDTH),
            &config.version,
        ));
    }
    lines.push(border('└', '┴', '┘'));
    lines
}

fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let kept: String = value.chars().take(width - 3).collect();
        format!("{kept}...")
    } else {
        value.to_string()
    }
}
