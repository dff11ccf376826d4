use std::{any::Any, collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::Mutex;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::{
        models::{Document, Filter, Stats},
        traits::{DocumentStore, Entity},
        value_objects::{compare_documents, SortKey},
    },
    error::AppError,
};

/// In-process document database: one insertion-ordered collection per entity type.
pub struct MemoryDatabase {
    name: String,
    collections: Mutex<HashMap<&'static str, Arc<dyn Any + Send + Sync>>>,
}

impl MemoryDatabase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: Mutex::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_connected(&self) -> bool {
        true
    }

    /// Returns the collection for `T`, creating it on first use.
    pub fn collection<T: Entity>(&self) -> Result<Arc<MemoryDocumentStore<T>>, AppError> {
        let mut guard = self.collections.lock();
        let entry = guard
            .entry(T::COLLECTION)
            .or_insert_with(|| Arc::new(MemoryDocumentStore::<T>::new()) as Arc<dyn Any + Send + Sync>)
            .clone();
        entry.downcast::<MemoryDocumentStore<T>>().map_err(|_| {
            AppError::Database(format!(
                "collection {} is already bound to another record type",
                T::COLLECTION
            ))
        })
    }

    pub fn collection_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.collections.lock().keys().copied().collect();
        names.sort_unstable();
        names
    }
}

pub struct MemoryDocumentStore<T> {
    inner: RwLock<IndexMap<Uuid, Document<T>>>,
}

impl<T: Entity> Default for MemoryDocumentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryDocumentStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(IndexMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl<T: Entity> DocumentStore<T> for MemoryDocumentStore<T> {
    async fn insert(&self, document: Document<T>) -> Result<Document<T>, AppError> {
        let mut guard = self.inner.write().await;
        if guard.contains_key(&document.id) {
            return Err(AppError::Conflict(format!(
                "{} {} already exists",
                T::LABEL,
                document.id
            )));
        }
        guard.insert(document.id, document.clone());
        Ok(document)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document<T>>, AppError> {
        let guard = self.inner.read().await;
        Ok(guard.get(&id).cloned())
    }

    async fn find(
        &self,
        filter: &Filter,
        sort: &[SortKey],
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Document<T>>, AppError> {
        let guard = self.inner.read().await;
        let matched: Vec<Document<T>> = guard
            .values()
            .filter(|document| filter.matches(*document))
            .cloned()
            .collect();
        drop(guard);

        let matched = if sort.is_empty() {
            matched
        } else {
            let mut keyed = matched
                .into_iter()
                .map(|document| {
                    serde_json::to_value(&document.body)
                        .map(|json| (document, json))
                        .map_err(|err| AppError::Internal(format!("serialize document: {err}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            keyed.sort_by(|(a, a_json), (b, b_json)| compare_documents(a, b, sort, a_json, b_json));
            keyed.into_iter().map(|(document, _)| document).collect()
        };

        Ok(matched.into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        let guard = self.inner.read().await;
        Ok(guard.values().filter(|document| filter.matches(*document)).count() as u64)
    }

    async fn stats(&self, created_since: DateTime<Utc>) -> Result<Stats, AppError> {
        let guard = self.inner.read().await;
        let mut stats = Stats {
            total: guard.len() as u64,
            active: 0,
            inactive: 0,
            recently_created: 0,
        };
        for document in guard.values() {
            if document.is_active {
                stats.active += 1;
            } else {
                stats.inactive += 1;
            }
            if document.created_at >= created_since {
                stats.recently_created += 1;
            }
        }
        Ok(stats)
    }

    async fn replace(&self, document: Document<T>) -> Result<Option<Document<T>>, AppError> {
        let mut guard = self.inner.write().await;
        match guard.get_mut(&document.id) {
            Some(entry) => {
                *entry = document.clone();
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Document<T>>, AppError> {
        let mut guard = self.inner.write().await;
        Ok(guard.shift_remove(&id))
    }
}
