use serde::Serialize;
use utoipa::ToSchema;

use crate::loader::reporter::ModuleInfo;

#[derive(Debug, Serialize, ToSchema)]
pub struct DatabaseStatus {
    /// `connected` or `disconnected`.
    pub status: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub physical_mem: Option<u64>,
    pub virtual_mem: Option<u64>,
}

impl MemoryUsage {
    pub fn current() -> Self {
        match memory_stats::memory_stats() {
            Some(usage) => Self {
                physical_mem: Some(usage.physical_mem as u64),
                virtual_mem: Some(usage.virtual_mem as u64),
            },
            None => Self {
                physical_mem: None,
                virtual_mem: None,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthReport {
    /// Seconds since the server started.
    pub uptime: f64,
    pub message: String,
    pub timestamp: String,
    pub environment: String,
    pub version: String,
    pub database: DatabaseStatus,
    pub memory: MemoryUsage,
    #[schema(value_type = Vec<Object>)]
    pub modules: Vec<ModuleInfo>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub data: HealthReport,
}
