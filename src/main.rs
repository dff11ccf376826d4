use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use rest_scaffold::{app::bootstrap::build_app, infra::config::AppConfig, modules::builtin_registry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let environment = config.environment.clone();
    let (app, report) = build_app(config, builtin_registry())?;

    tracing::info!(
        %addr,
        environment = %environment,
        modules = report.loaded().count(),
        "starting server"
    );
    axum::Server::bind(&addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
