use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::error::AppError;

const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub environment: String,
    pub version: String,
    pub modules_dir: PathBuf,
    pub database_name: String,
    pub api_tokens: Vec<String>,
    pub rate_limit_window_ms: u64,
    /// 0 disables the global `/api/` limiter.
    pub rate_limit_max: u32,
    pub body_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "local".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            modules_dir: PathBuf::from("src/modules"),
            database_name: "rest-scaffold".to_string(),
            api_tokens: Vec::new(),
            rate_limit_window_ms: 15 * 60 * 1000,
            rate_limit_max: 100,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        load_env_file(&environment);

        let defaults = Self::default();

        let port: u16 = parse_var("PORT", defaults.port)?;
        let modules_dir = env::var("MODULES_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.modules_dir);
        let database_name = env::var("DATABASE_NAME").unwrap_or(defaults.database_name);
        let api_tokens = env::var("API_TOKENS")
            .map(|raw| split_tokens(&raw))
            .unwrap_or_default();
        let rate_limit_window_ms = parse_var("RATE_LIMIT_WINDOW_MS", defaults.rate_limit_window_ms)?;
        let rate_limit_max = parse_var("RATE_LIMIT_MAX", defaults.rate_limit_max)?;
        let body_limit_bytes = parse_var("BODY_LIMIT_BYTES", defaults.body_limit_bytes)?;
        let version = env::var("APP_VERSION").unwrap_or(defaults.version);

        if rate_limit_window_ms == 0 {
            return Err(AppError::Validation(
                "invalid RATE_LIMIT_WINDOW_MS: must be positive".into(),
            ));
        }

        Ok(Self {
            port,
            environment,
            version,
            modules_dir,
            database_name,
            api_tokens,
            rate_limit_window_ms,
            rate_limit_max,
            body_limit_bytes,
        })
    }
}

/// Maps the runtime environment to its dotenv file, falling back to `.env`.
pub fn env_file_for(environment: &str) -> &'static str {
    match environment {
        "local" => ".env.local",
        "development" => ".env.development",
        "production" => ".env.production",
        _ => ".env",
    }
}

fn load_env_file(environment: &str) {
    let file = env_file_for(environment);
    match dotenvy::from_path(Path::new(file)) {
        Ok(()) => tracing::info!(file, "loaded environment configuration"),
        Err(err) => {
            tracing::warn!(file, error = %err, "could not load env file, falling back to .env");
            dotenvy::dotenv().ok();
        }
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|err| AppError::Validation(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
