use serde::{Deserialize, Serialize};

use crate::domain::traits::Entity;

use super::validation::{CreateProduct, UpdateProduct};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity for Product {
    const COLLECTION: &'static str = "products";
    const LABEL: &'static str = "Product";
    const LABEL_PLURAL: &'static str = "Products";

    type Create = CreateProduct;
    type Update = UpdateProduct;

    fn from_create(input: CreateProduct) -> Self {
        Self {
            name: input.name,
            description: input.description,
        }
    }

    fn apply_update(&mut self, patch: UpdateProduct) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}
