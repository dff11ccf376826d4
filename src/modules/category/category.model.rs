use serde::{Deserialize, Serialize};

use crate::domain::traits::Entity;

use super::validation::{CreateCategory, UpdateCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity for Category {
    const COLLECTION: &'static str = "categories";
    const LABEL: &'static str = "Category";
    const LABEL_PLURAL: &'static str = "Categories";

    type Create = CreateCategory;
    type Update = UpdateCategory;

    fn from_create(input: CreateCategory) -> Self {
        Self {
            name: input.name,
            description: input.description,
        }
    }

    fn apply_update(&mut self, patch: UpdateCategory) {
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
