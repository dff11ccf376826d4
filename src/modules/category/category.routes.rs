use std::sync::Arc;

use axum::Router;

use crate::{
    error::AppError,
    loader::{ModuleContext, RouteModule},
};

#[path = "category.controller.rs"]
pub mod controller;
#[path = "category.model.rs"]
pub mod model;
#[path = "category.service.rs"]
pub mod service;
#[path = "category.validation.rs"]
pub mod validation;

pub use model::Category;
pub use service::CategoryService;

pub struct CategoryModule;

impl RouteModule for CategoryModule {
    fn name(&self) -> &'static str {
        "category"
    }

    fn build_router(&self, ctx: &ModuleContext) -> Result<Router, AppError> {
        let service = Arc::new(CategoryService::new(ctx.store::<Category>()?));
        Ok(controller::router(service, ctx.auth.clone()))
    }
}
