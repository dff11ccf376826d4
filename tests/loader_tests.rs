use std::{fs, path::Path, sync::Arc};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use tempfile::tempdir;
use tower::ServiceExt;

use rest_scaffold::{
    api::auth::AuthGate,
    error::AppError,
    infra::{config::AppConfig, repos::memory::MemoryDatabase},
    loader::{
        middleware::MiddlewareRegistry,
        mount_modules,
        reporter::module_info,
        route_config::RouteConfigOverride,
        ModuleContext, ModuleRegistry, ModuleStatus, MountReport, RouteModule, RESERVED_PATHS,
    },
};

struct Ping {
    name: &'static str,
    described: RouteConfigOverride,
}

impl Ping {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            described: RouteConfigOverride::default(),
        }
    }
}

impl RouteModule for Ping {
    fn name(&self) -> &'static str {
        self.name
    }

    fn describe(&self) -> RouteConfigOverride {
        self.described.clone()
    }

    fn build_router(&self, _ctx: &ModuleContext) -> Result<Router, AppError> {
        let name = self.name;
        Ok(Router::new().route("/ping", get(move || async move { name })))
    }
}

fn add_module(root: &Path, name: &str, config: Option<(&str, &str)>) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{name}.routes.rs")), "").unwrap();
    if let Some((ext, content)) = config {
        fs::write(dir.join(format!("route.config.{ext}")), content).unwrap();
    }
}

fn context() -> ModuleContext {
    ModuleContext {
        config: AppConfig::default(),
        database: Arc::new(MemoryDatabase::new("loader-tests")),
        auth: AuthGate::new(["secret"]),
    }
}

fn builtins() -> MiddlewareRegistry {
    MiddlewareRegistry::with_builtins(AuthGate::new(["secret"]))
}

fn mount(root: &Path, registry: &ModuleRegistry) -> (Router, MountReport) {
    mount_modules(Router::new(), root, registry, &builtins(), &context(), RESERVED_PATHS)
}

async fn get_path(app: &Router, path: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn mounts_at_default_path_and_skips_dirs_without_routes() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", None);
    fs::create_dir_all(tmp.path().join("assets")).unwrap();

    let registry = ModuleRegistry::new().with(Ping::new("alpha"));
    let (app, report) = mount(tmp.path(), &registry);

    assert_eq!(report.status_of("assets"), Some(&ModuleStatus::MissingRoutes));
    assert!(matches!(report.status_of("alpha"), Some(ModuleStatus::Loaded(_))));

    let response = get_path(&app, "/api/alpha/ping").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "alpha");
}

#[tokio::test]
async fn disabled_modules_are_not_mounted() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "enabled = false\n")));

    let registry = ModuleRegistry::new().with(Ping::new("alpha"));
    let (app, report) = mount(tmp.path(), &registry);

    assert_eq!(report.status_of("alpha"), Some(&ModuleStatus::Disabled));
    assert_eq!(get_path(&app, "/api/alpha/ping").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn broken_config_does_not_block_siblings() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "path = [not toml")));
    add_module(tmp.path(), "beta", Some(("json", r#"{"path": "/api/b"}"#)));
    add_module(tmp.path(), "gamma", Some(("yaml", "path: /api/g")));

    let registry = ModuleRegistry::new()
        .with(Ping::new("alpha"))
        .with(Ping::new("beta"))
        .with(Ping::new("gamma"));
    let (app, report) = mount(tmp.path(), &registry);

    assert!(matches!(report.status_of("alpha"), Some(ModuleStatus::Failed(_))));
    assert!(matches!(report.status_of("gamma"), Some(ModuleStatus::Failed(_))));
    assert_eq!(report.loaded().count(), 1);
    assert_eq!(get_path(&app, "/api/b/ping").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn config_file_wins_over_module_description() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "path = \"/api/from-file\"\n")));

    let registry = ModuleRegistry::new().with(Ping {
        name: "alpha",
        described: RouteConfigOverride {
            path: Some("/api/from-code".into()),
            description: Some("Alpha endpoints".into()),
            ..RouteConfigOverride::default()
        },
    });
    let (app, report) = mount(tmp.path(), &registry);

    let (_, config) = report.loaded().next().unwrap();
    assert_eq!(config.path, "/api/from-file");
    assert_eq!(config.description, "Alpha endpoints");
    assert_eq!(config.version, "v1");
    assert_eq!(get_path(&app, "/api/from-code/ping").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get_path(&app, "/api/from-file/ping").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn overlapping_paths_keep_the_first_module() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "path = \"/api/shared\"\n")));
    add_module(tmp.path(), "beta", Some(("toml", "path = \"/api/shared/inner\"\n")));
    add_module(tmp.path(), "gamma", Some(("toml", "path = \"/api/health\"\n")));

    let registry = ModuleRegistry::new()
        .with(Ping::new("alpha"))
        .with(Ping::new("beta"))
        .with(Ping::new("gamma"));
    let (app, report) = mount(tmp.path(), &registry);

    assert!(matches!(report.status_of("alpha"), Some(ModuleStatus::Loaded(_))));
    assert!(matches!(report.status_of("beta"), Some(ModuleStatus::Failed(_))));
    assert!(matches!(report.status_of("gamma"), Some(ModuleStatus::Failed(_))));
    assert_eq!(body_text(get_path(&app, "/api/shared/ping").await).await, "alpha");
}

#[tokio::test]
async fn unregistered_modules_and_unknown_middleware_fail() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "middleware = [\"compress\"]\n")));
    add_module(tmp.path(), "orphan", None);

    let registry = ModuleRegistry::new().with(Ping::new("alpha"));
    let (_, report) = mount(tmp.path(), &registry);

    match report.status_of("alpha") {
        Some(ModuleStatus::Failed(reason)) => assert!(reason.contains("compress")),
        other => panic!("unexpected status {other:?}"),
    }
    assert!(matches!(report.status_of("orphan"), Some(ModuleStatus::Failed(_))));
}

#[tokio::test]
async fn auth_middleware_gates_the_whole_module() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "middleware = [\"auth\", \"no-store\"]\n")));

    let registry = ModuleRegistry::new().with(Ping::new("alpha"));
    let (app, _) = mount(tmp.path(), &registry);

    assert_eq!(
        get_path(&app, "/api/alpha/ping").await.status(),
        StatusCode::UNAUTHORIZED
    );
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/alpha/ping")
                .header("authorization", "Bearer secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cache-control"], "no-store");
}

#[tokio::test]
async fn module_rate_limit_uses_fallback_message() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "[rateLimit]\nmax = 2\n")));

    let registry = ModuleRegistry::new().with(Ping::new("alpha"));
    let (app, report) = mount(tmp.path(), &registry);

    let (_, config) = report.loaded().next().unwrap();
    let limit = config.rate_limit.as_ref().unwrap();
    assert_eq!(limit.window_ms, None);
    assert_eq!(limit.max, Some(2));

    for remaining in ["1", "0"] {
        let response = get_path(&app, "/api/alpha/ping").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-ratelimit-remaining"], remaining);
    }

    let limited = get_path(&app, "/api/alpha/ping").await;
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(limited.headers().contains_key("retry-after"));
    let body: serde_json::Value = serde_json::from_str(&body_text(limited).await).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Too many requests to alpha API");
}

#[tokio::test]
async fn module_limit_counts_unmatched_paths() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "[rateLimit]\nmax = 1\n")));

    let registry = ModuleRegistry::new().with(Ping::new("alpha"));
    let (app, _) = mount(tmp.path(), &registry);

    let first = get_path(&app, "/api/alpha/nope").await;
    assert_eq!(first.status(), StatusCode::NOT_FOUND);
    assert_eq!(first.headers()["x-ratelimit-remaining"], "0");
    let body: serde_json::Value = serde_json::from_str(&body_text(first).await).unwrap();
    assert_eq!(body["message"], "Route not found - /api/alpha/nope");

    for _ in 0..2 {
        let status = get_path(&app, "/api/alpha/nope").await.status();
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }
}

#[tokio::test]
async fn module_middleware_sees_unmatched_paths() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "middleware = [\"auth\"]\n")));

    let registry = ModuleRegistry::new().with(Ping::new("alpha"));
    let (app, _) = mount(tmp.path(), &registry);

    assert_eq!(
        get_path(&app, "/api/alpha/missing/deeper").await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[test]
fn reporter_agrees_with_mounter() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "path = \"/api/shared\"\n")));
    add_module(tmp.path(), "beta", Some(("toml", "path = \"/api/shared\"\n")));
    add_module(tmp.path(), "orphan", None);
    add_module(tmp.path(), "zeta", Some(("toml", "middleware = [\"compress\"]\n")));

    let registry = ModuleRegistry::new()
        .with(Ping::new("alpha"))
        .with(Ping::new("beta"))
        .with(Ping::new("zeta"));
    let (_, report) = mount(tmp.path(), &registry);
    let mounted: Vec<&str> = report.loaded().map(|(name, _)| name).collect();

    let info = module_info(tmp.path(), &registry, &builtins());
    let reported: Vec<&str> = info.iter().map(|m| m.module.as_str()).collect();

    assert_eq!(mounted, vec!["alpha"]);
    assert_eq!(reported, mounted);
}

#[test]
fn reporter_lists_only_mountable_modules() {
    let tmp = tempdir().unwrap();
    add_module(tmp.path(), "alpha", Some(("toml", "description = \"Alpha\"\n")));
    add_module(tmp.path(), "beta", Some(("toml", "enabled = false\n")));
    add_module(tmp.path(), "gamma", Some(("toml", "path = \"no-slash\"\n")));
    fs::create_dir_all(tmp.path().join("delta")).unwrap();

    let registry = ModuleRegistry::new().with(Ping::new("alpha"));
    let info = module_info(tmp.path(), &registry, &builtins());

    assert_eq!(info.len(), 1);
    let json = serde_json::to_value(&info[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "module": "alpha",
            "path": "/api/alpha",
            "enabled": true,
            "description": "Alpha",
            "version": "v1"
        })
    );
}

#[test]
fn missing_modules_root_mounts_nothing() {
    let tmp = tempdir().unwrap();
    let registry = ModuleRegistry::new().with(Ping::new("alpha"));
    let (_, report) = mount(&tmp.path().join("absent"), &registry);
    assert!(report.modules.is_empty());
    assert!(module_info(&tmp.path().join("absent"), &registry, &builtins()).is_empty());
}
