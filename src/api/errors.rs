use std::any::Any;

use axum::{
    extract::OriginalUri,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

pub type ApiResult<T> = Result<T, AppError>;

/// Fallback for paths no route claimed, at the app root or under a module.
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("Route not found - {}", uri.path()))
}

/// Turns a handler panic into the generic failure envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(detail).into_response()
}
