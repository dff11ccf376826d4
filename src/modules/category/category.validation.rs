use serde::Deserialize;
use validator::Validate;

use crate::dto::trimmed;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Name must be between 2 and 100 characters long"
    ))]
    #[serde(deserialize_with = "trimmed::string")]
    pub name: String,
    #[validate(length(max = 500, message = "Description cannot be more than 500 characters long"))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Name must be between 2 and 100 characters long"
    ))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description cannot be more than 500 characters long"))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub description: Option<String>,
}
