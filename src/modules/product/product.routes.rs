use std::sync::Arc;

use axum::Router;

use crate::{
    error::AppError,
    loader::{route_config::RouteConfigOverride, ModuleContext, RouteModule},
};

#[path = "product.controller.rs"]
pub mod controller;
#[path = "product.model.rs"]
pub mod model;
#[path = "product.service.rs"]
pub mod service;
#[path = "product.validation.rs"]
pub mod validation;

pub use model::Product;
pub use service::ProductService;

pub struct ProductModule;

impl RouteModule for ProductModule {
    fn name(&self) -> &'static str {
        "product"
    }

    fn describe(&self) -> RouteConfigOverride {
        RouteConfigOverride {
            path: Some("/api/products".into()),
            description: Some("Product management endpoints".into()),
            ..RouteConfigOverride::default()
        }
    }

    fn build_router(&self, ctx: &ModuleContext) -> Result<Router, AppError> {
        let service = Arc::new(ProductService::new(ctx.store::<Product>()?));
        Ok(controller::router(service, ctx.auth.clone()))
    }
}
