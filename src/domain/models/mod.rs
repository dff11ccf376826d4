use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{traits::Entity, value_objects::SortKey};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;
pub const DEFAULT_SORT: &str = "-createdAt";

/// Stored record: the entity body plus the bookkeeping fields every collection shares.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub body: T,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T: Entity> Document<T> {
    pub fn new(body: T, is_active: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            body,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub is_active: Option<bool>,
    /// Case-insensitive substring matched against `Entity::search_fields`.
    pub search: Option<String>,
}

impl Filter {
    pub fn matches<T: Entity>(&self, document: &Document<T>) -> bool {
        if let Some(is_active) = self.is_active {
            if document.is_active != is_active {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            return document
                .body
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub page: u32,
    pub limit: u32,
    pub sort: Vec<SortKey>,
    pub filter: Filter,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: SortKey::parse_list(DEFAULT_SORT),
            filter: Filter::default(),
        }
    }
}

impl ListOptions {
    pub fn skip(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<Document<T>>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub recently_created: u64,
}
