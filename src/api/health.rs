use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use utoipa::OpenApi;

use crate::{
    app::bootstrap::AppState,
    dto::health::{DatabaseStatus, HealthReport, HealthResponse, MemoryUsage},
    loader::reporter::module_info,
    oas::ApiDoc,
};

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, body = HealthResponse),
        (status = 503, body = HealthResponse, description = "Database unreachable")
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let connected = state.database.is_connected();
    let report = HealthReport {
        uptime: state.started_at.elapsed().as_secs_f64(),
        message: if connected {
            "Server is running".to_string()
        } else {
            "Server is experiencing issues".to_string()
        },
        timestamp: Utc::now().to_rfc3339(),
        environment: state.config.environment.clone(),
        version: state.config.version.clone(),
        database: DatabaseStatus {
            status: if connected { "connected" } else { "disconnected" }.to_string(),
            name: state.database.name().to_string(),
        },
        memory: MemoryUsage::current(),
        modules: module_info(&state.config.modules_dir, &state.registry, &state.middleware),
    };

    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(HealthResponse {
            success: connected,
            data: report,
        }),
    )
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
