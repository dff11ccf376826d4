use std::sync::Arc;

use axum::Router;

use crate::api::{auth::AuthGate, crud::resource_router};

use super::service::CategoryService;

pub fn router(service: Arc<CategoryService>, auth: AuthGate) -> Router {
    resource_router(service, auth)
}
