//! Second-hand equipment listings.

use serde::{Deserialize, Serialize};

use crate::domain::traits::Entity;

use super::validation::{CreateEquipment, UpdateEquipment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Worn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub title: String,
    pub description: String,
    /// Stored lowercase.
    pub category: String,
    pub condition: Condition,
    pub price: f64,
    pub brand: String,
    pub seller_name: String,
    /// Stored lowercase.
    pub seller_email: String,
    pub seller_phone: String,
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
}

fn lower(value: String) -> String {
    value.to_lowercase()
}

impl Entity for Equipment {
    const COLLECTION: &'static str = "equipments";
    const LABEL: &'static str = "Equipment";
    const LABEL_PLURAL: &'static str = "Equipments";

    type Create = CreateEquipment;
    type Update = UpdateEquipment;

    fn from_create(input: CreateEquipment) -> Self {
        Self {
            title: input.title,
            description: input.description,
            category: lower(input.category),
            condition: input.condition,
            price: input.price,
            brand: input.brand,
            seller_name: input.seller_name,
            seller_email: lower(input.seller_email),
            seller_phone: input.seller_phone,
            location: input.location,
            images: input.images.unwrap_or_default(),
        }
    }

    fn apply_update(&mut self, patch: UpdateEquipment) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = lower(category);
        }
        if let Some(condition) = patch.condition {
            self.condition = condition;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(brand) = patch.brand {
            self.brand = brand;
        }
        if let Some(seller_name) = patch.seller_name {
            self.seller_name = seller_name;
        }
        if let Some(seller_email) = patch.seller_email {
            self.seller_email = lower(seller_email);
        }
        if let Some(seller_phone) = patch.seller_phone {
            self.seller_phone = seller_phone;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
            self.brand.as_str(),
            self.location.as_str(),
        ]
    }
}
