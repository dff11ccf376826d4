use serde::Deserialize;

use crate::{
    domain::{
        models::{ListOptions, DEFAULT_LIMIT, DEFAULT_PAGE, DEFAULT_SORT, MAX_LIMIT},
        value_objects::SortKey,
    },
    error::AppError,
};

/// Query string accepted by list and search endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    pub is_active: Option<bool>,
    pub q: Option<String>,
}

impl ListQuery {
    pub fn to_options(&self) -> Result<ListOptions, AppError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(AppError::Validation("page must be at least 1".into()));
        }
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        let sort = self.sort.as_deref().unwrap_or(DEFAULT_SORT);

        let mut options = ListOptions {
            page,
            limit,
            sort: SortKey::parse_list(sort),
            ..ListOptions::default()
        };
        options.filter.is_active = self.is_active;
        Ok(options)
    }

    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|term| !term.is_empty())
    }
}
