use std::sync::Arc;

use axum::Router;

use crate::{
    error::AppError,
    loader::{ModuleContext, RouteModule},
};

#[path = "equipment.controller.rs"]
pub mod controller;
#[path = "equipment.model.rs"]
pub mod model;
#[path = "equipment.service.rs"]
pub mod service;
#[path = "equipment.validation.rs"]
pub mod validation;

pub use model::{Condition, Equipment};
pub use service::EquipmentService;

pub struct EquipmentModule;

impl RouteModule for EquipmentModule {
    fn name(&self) -> &'static str {
        "equipment"
    }

    fn build_router(&self, ctx: &ModuleContext) -> Result<Router, AppError> {
        let service = Arc::new(EquipmentService::new(ctx.store::<Equipment>()?));
        Ok(controller::router(service, ctx.auth.clone()))
    }
}
