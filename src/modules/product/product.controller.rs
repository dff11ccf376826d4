use std::sync::Arc;

use axum::{routing::get, Router};

use crate::api::{
    auth::AuthGate,
    crud::{get_active, resource_router},
};

use super::{model::Product, service::ProductService};

/// Standard resource routes plus a public `GET /active` listing.
pub fn router(service: Arc<ProductService>, auth: AuthGate) -> Router {
    let storefront = Router::new()
        .route("/active", get(get_active::<Product>))
        .with_state(service.clone());

    storefront.merge(resource_router(service, auth))
}
