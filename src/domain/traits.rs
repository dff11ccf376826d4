use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{
        models::{Document, Filter, Stats},
        value_objects::SortKey,
    },
    error::AppError,
};

/// A record type stored in its own collection and exposed as a CRUD resource.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name in the document database.
    const COLLECTION: &'static str;
    /// Singular label used in response messages.
    const LABEL: &'static str;
    const LABEL_PLURAL: &'static str;

    type Create: DeserializeOwned + Validate + Send + 'static;
    type Update: DeserializeOwned + Validate + Send + 'static;

    fn from_create(input: Self::Create) -> Self;
    fn apply_update(&mut self, patch: Self::Update);

    /// Text fields matched by free-text search.
    fn search_fields(&self) -> Vec<&str>;
}

#[async_trait]
pub trait DocumentStore<T: Entity>: Send + Sync {
    async fn insert(&self, document: Document<T>) -> Result<Document<T>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document<T>>, AppError>;
    async fn find(
        &self,
        filter: &Filter,
        sort: &[SortKey],
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Document<T>>, AppError>;
    async fn count(&self, filter: &Filter) -> Result<u64, AppError>;
    /// All counters from one consistent read of the collection.
    async fn stats(&self, created_since: DateTime<Utc>) -> Result<Stats, AppError>;
    /// Replaces the stored document with the same id; `None` when it does not exist.
    async fn replace(&self, document: Document<T>) -> Result<Option<Document<T>>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<Option<Document<T>>, AppError>;
}
