use utoipa::OpenApi;

use crate::{domain::models, dto};

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::health::health),
    components(schemas(
        dto::health::HealthResponse,
        dto::health::HealthReport,
        dto::health::DatabaseStatus,
        dto::health::MemoryUsage,
        models::Pagination,
        models::Stats,
    )),
    tags(
        (name = "health", description = "Process, database and module status"),
    )
)]
pub struct ApiDoc;
