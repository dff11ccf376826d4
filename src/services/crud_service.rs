use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    domain::{
        models::{Document, ListOptions, Page, Pagination, Stats},
        traits::{DocumentStore, Entity},
    },
    error::AppError,
};

use super::ServiceResult;

/// CRUD, search and statistics over one entity collection.
pub struct CrudService<T: Entity> {
    store: Arc<dyn DocumentStore<T>>,
}

impl<T: Entity> CrudService<T> {
    pub fn new(store: Arc<dyn DocumentStore<T>>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self, options: ListOptions) -> ServiceResult<Page<T>> {
        if options.limit == 0 || options.page == 0 {
            return Err(AppError::Validation(
                "page and limit must be positive".into(),
            ));
        }
        let total = self.store.count(&options.filter).await?;
        let items = self
            .store
            .find(
                &options.filter,
                &options.sort,
                options.skip(),
                options.limit as usize,
            )
            .await?;
        Ok(Page {
            items,
            pagination: Pagination::new(options.page, options.limit, total),
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<Document<T>> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(not_found::<T>)
    }

    pub async fn create(
        &self,
        input: T::Create,
        is_active: Option<bool>,
    ) -> ServiceResult<Document<T>> {
        let document = Document::new(T::from_create(input), is_active.unwrap_or(true), Utc::now());
        self.store.insert(document).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: T::Update,
        is_active: Option<bool>,
    ) -> ServiceResult<Document<T>> {
        let mut document = self.get_by_id(id).await?;
        document.body.apply_update(patch);
        if let Some(is_active) = is_active {
            document.is_active = is_active;
        }
        document.updated_at = Utc::now();
        self.store
            .replace(document)
            .await?
            .ok_or_else(not_found::<T>)
    }

    /// Removes the record permanently.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<Document<T>> {
        self.store.delete(id).await?.ok_or_else(not_found::<T>)
    }

    /// Soft delete: the record stays but is flagged inactive.
    pub async fn deactivate(&self, id: Uuid) -> ServiceResult<Document<T>> {
        let mut document = self.get_by_id(id).await?;
        document.is_active = false;
        document.updated_at = Utc::now();
        self.store
            .replace(document)
            .await?
            .ok_or_else(not_found::<T>)
    }

    pub async fn get_active(&self, mut options: ListOptions) -> ServiceResult<Page<T>> {
        options.filter.is_active = Some(true);
        self.get_all(options).await
    }

    pub async fn search(&self, term: &str, mut options: ListOptions) -> ServiceResult<Page<T>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::Validation("Search term is required".into()));
        }
        options.filter.search = Some(term.to_string());
        self.get_all(options).await
    }

    pub async fn get_stats(&self) -> ServiceResult<Stats> {
        self.store
            .stats(Utc::now() - Duration::hours(24))
            .await
    }
}

fn not_found<T: Entity>() -> AppError {
    AppError::NotFound(format!("{} not found", T::LABEL))
}
