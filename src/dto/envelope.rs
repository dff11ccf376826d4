use serde::Serialize;

use crate::domain::models::{Page, Pagination};

/// Body shape shared by every module endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            pagination: None,
        }
    }
}

impl<T> ApiResponse<Vec<crate::domain::models::Document<T>>> {
    pub fn paginated(message: impl Into<String>, page: Page<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(page.items),
            pagination: Some(page.pagination),
        }
    }
}
