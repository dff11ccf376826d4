use std::sync::Arc;

use axum::Router;

use crate::api::{auth::AuthGate, crud::resource_router};

use super::service::EquipmentService;

pub fn router(service: Arc<EquipmentService>, auth: AuthGate) -> Router {
    resource_router(service, auth)
}
