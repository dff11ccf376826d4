use serde::Deserialize;
use validator::Validate;

use crate::dto::trimmed;

use super::model::Condition;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[serde(deserialize_with = "trimmed::string")]
    pub title: String,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description must be between 1 and 2000 characters"
    ))]
    #[serde(deserialize_with = "trimmed::string")]
    pub description: String,
    #[validate(length(min = 1, message = "Category is required"))]
    #[serde(deserialize_with = "trimmed::string")]
    pub category: String,
    pub condition: Condition,
    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: f64,
    #[validate(length(min = 1, message = "Brand is required"))]
    #[serde(deserialize_with = "trimmed::string")]
    pub brand: String,
    #[validate(length(min = 1, message = "Seller name is required"))]
    #[serde(deserialize_with = "trimmed::string")]
    pub seller_name: String,
    #[validate(email(message = "Please provide a valid email address"))]
    #[serde(deserialize_with = "trimmed::string")]
    pub seller_email: String,
    #[validate(length(min = 1, message = "Seller phone is required"))]
    #[serde(deserialize_with = "trimmed::string")]
    pub seller_phone: String,
    #[validate(length(min = 1, message = "Location is required"))]
    #[serde(deserialize_with = "trimmed::string")]
    pub location: String,
    #[validate(length(max = 10, message = "Cannot upload more than 10 images"))]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub title: Option<String>,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description must be between 1 and 2000 characters"
    ))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub category: Option<String>,
    pub condition: Option<Condition>,
    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "Brand is required"))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub brand: Option<String>,
    #[validate(length(min = 1, message = "Seller name is required"))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub seller_name: Option<String>,
    #[validate(email(message = "Please provide a valid email address"))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub seller_email: Option<String>,
    #[validate(length(min = 1, message = "Seller phone is required"))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub seller_phone: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    #[serde(default, deserialize_with = "trimmed::option")]
    pub location: Option<String>,
    #[validate(length(max = 10, message = "Cannot upload more than 10 images"))]
    pub images: Option<Vec<String>>,
}
