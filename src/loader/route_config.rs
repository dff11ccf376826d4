use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::AppError, loader::descriptor::ModuleDescriptor};

pub const DEFAULT_VERSION: &str = "v1";

/// Module-scoped limiter settings exactly as configured. Missing fields are filled
/// in when the limiter is built, never during merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Partial route configuration: a `route.config.*` file or `RouteModule::describe()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfigOverride {
    pub path: Option<String>,
    pub enabled: Option<bool>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub rate_limit: Option<RateLimitConfig>,
    /// Names looked up in the middleware registry, applied in order.
    pub middleware: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRouteConfig {
    pub path: String,
    pub enabled: bool,
    pub description: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middleware: Option<Vec<String>>,
}

impl ResolvedRouteConfig {
    pub fn defaults_for(module: &str) -> Self {
        Self {
            path: format!("/api/{module}"),
            enabled: true,
            description: format!("{module} module routes"),
            version: DEFAULT_VERSION.to_string(),
            rate_limit: None,
            middleware: None,
        }
    }

    /// Shallow merge: every key present in `over` replaces the current value whole.
    pub fn merge(self, over: RouteConfigOverride) -> Self {
        Self {
            path: over.path.unwrap_or(self.path),
            enabled: over.enabled.unwrap_or(self.enabled),
            description: over.description.unwrap_or(self.description),
            version: over.version.unwrap_or(self.version),
            rate_limit: over.rate_limit.or(self.rate_limit),
            middleware: over.middleware.or(self.middleware),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let path = self.path.as_str();
        if !path.starts_with('/') {
            return Err(AppError::ModuleLoad(format!(
                "path {path:?} must start with '/'"
            )));
        }
        if path == "/" || path.ends_with('/') {
            return Err(AppError::ModuleLoad(format!(
                "path {path:?} must name a prefix without a trailing '/'"
            )));
        }
        if path.contains(':') || path.contains('*') || path.contains("//") {
            return Err(AppError::ModuleLoad(format!(
                "path {path:?} must be a static prefix"
            )));
        }
        if let Some(limit) = &self.rate_limit {
            if limit.window_ms == Some(0) {
                return Err(AppError::ModuleLoad(
                    "rateLimit.windowMs must be positive".into(),
                ));
            }
            if limit.max == Some(0) {
                return Err(AppError::ModuleLoad("rateLimit.max must be positive".into()));
            }
        }
        Ok(())
    }
}

/// Reads a `route.config.{toml,json}` file.
pub fn load_override(path: &Path) -> Result<RouteConfigOverride, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|err| AppError::ModuleLoad(format!("read {}: {err}", path.display())))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&raw)
            .map_err(|err| AppError::ModuleLoad(format!("parse {}: {err}", path.display()))),
        Some("json") => serde_json::from_str(&raw)
            .map_err(|err| AppError::ModuleLoad(format!("parse {}: {err}", path.display()))),
        _ => Err(AppError::ModuleLoad(format!(
            "unsupported config format: {}",
            path.display()
        ))),
    }
}

/// Defaults, then the module's own description, then the config file on disk.
pub fn resolve(
    descriptor: &ModuleDescriptor,
    described: Option<RouteConfigOverride>,
) -> Result<ResolvedRouteConfig, AppError> {
    let mut config = ResolvedRouteConfig::defaults_for(&descriptor.name);
    if let Some(described) = described {
        config = config.merge(described);
    }
    if let Some(file) = &descriptor.config_file {
        config = config.merge(load_override(file)?);
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_defaults_for_missing_keys() {
        let base = ResolvedRouteConfig::defaults_for("x");
        let resolved = base.merge(RouteConfigOverride {
            path: Some("/api/y".into()),
            ..RouteConfigOverride::default()
        });
        assert_eq!(resolved.path, "/api/y");
        assert_eq!(resolved.version, "v1");
        assert!(resolved.enabled);
        assert_eq!(resolved.description, "x module routes");
    }

    #[test]
    fn partial_rate_limit_replaces_the_whole_record() {
        let base = ResolvedRouteConfig {
            rate_limit: Some(RateLimitConfig {
                window_ms: Some(60_000),
                max: Some(10),
                message: Some("slow down".into()),
            }),
            ..ResolvedRouteConfig::defaults_for("x")
        };
        let resolved = base.merge(RouteConfigOverride {
            rate_limit: Some(RateLimitConfig {
                max: Some(5),
                ..RateLimitConfig::default()
            }),
            ..RouteConfigOverride::default()
        });
        assert_eq!(
            resolved.rate_limit,
            Some(RateLimitConfig {
                window_ms: None,
                max: Some(5),
                message: None,
            })
        );
    }

    #[test]
    fn toml_keys_are_camel_case() {
        let parsed: RouteConfigOverride = toml::from_str(
            r#"
            path = "/api/widgets"
            enabled = false
            middleware = ["auth", "request-log"]

            [rateLimit]
            windowMs = 60000
            max = 10
            "#,
        )
        .unwrap();
        assert_eq!(parsed.path.as_deref(), Some("/api/widgets"));
        assert_eq!(parsed.enabled, Some(false));
        assert_eq!(parsed.rate_limit.unwrap().window_ms, Some(60_000));
        assert_eq!(parsed.middleware.unwrap(), vec!["auth", "request-log"]);
    }

    #[test]
    fn invalid_paths_are_rejected() {
        for path in ["api/x", "/", "/api/x/", "/api/:id", "/api//x"] {
            let config = ResolvedRouteConfig {
                path: path.to_string(),
                ..ResolvedRouteConfig::defaults_for("x")
            };
            assert!(config.validate().is_err(), "{path} should be rejected");
        }
    }

    #[test]
    fn zero_limits_are_rejected() {
        let config = ResolvedRouteConfig {
            rate_limit: Some(RateLimitConfig {
                max: Some(0),
                ..RateLimitConfig::default()
            }),
            ..ResolvedRouteConfig::defaults_for("x")
        };
        assert!(config.validate().is_err());
    }
}
