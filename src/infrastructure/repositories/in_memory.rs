// src/infrastructure/repositories/in_memory.rs
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::document::{
    Document, DocumentFilter, DocumentId, DocumentReadRepository, DocumentWriteRepository,
    FieldName,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::schema::Schema;

#[derive(Default)]
struct Collection {
    next_id: i64,
    documents: BTreeMap<DocumentId, Document>,
}

/// A single collection held in process memory, enforcing the schema's
/// unique attributes the way a database unique index would.
pub struct InMemoryDocumentStore {
    unique_fields: Vec<FieldName>,
    inner: Mutex<Collection>,
}

impl InMemoryDocumentStore {
    pub fn new(schema: &Schema) -> Self {
        Self {
            unique_fields: schema.unique_attributes().cloned().collect(),
            inner: Mutex::new(Collection::default()),
        }
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, Collection>> {
        self.inner
            .lock()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
    }

    fn check_unique(&self, collection: &Collection, document: &Document) -> DomainResult<()> {
        for field in &self.unique_fields {
            let Some(value) = document.get_str(field.as_str()).filter(|v| !v.is_empty()) else {
                continue;
            };
            let taken = collection.documents.values().any(|other| {
                other.id() != document.id() && other.get_str(field.as_str()) == Some(value)
            });
            if taken {
                return Err(DomainError::duplicate_key(field.as_str(), value));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.lock()?.documents.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl DocumentWriteRepository for InMemoryDocumentStore {
    async fn insert(&self, document: Document) -> DomainResult<Document> {
        if !document.is_new() {
            return Err(DomainError::Conflict("document is already persisted".into()));
        }
        let mut collection = self.lock()?;
        self.check_unique(&collection, &document)?;

        collection.next_id += 1;
        let id = DocumentId::new(collection.next_id)?;
        let created_at = document.created_at.unwrap_or_else(Utc::now);
        let updated_at = document.updated_at.unwrap_or(created_at);
        let stored = Document::hydrate(id, document.fields().clone(), created_at, updated_at);
        collection.documents.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, document: Document) -> DomainResult<Document> {
        let id = document
            .id()
            .ok_or_else(|| DomainError::NotFound("document has not been persisted".into()))?;
        let mut collection = self.lock()?;
        let created_at = collection
            .documents
            .get(&id)
            .and_then(|existing| existing.created_at)
            .ok_or_else(|| DomainError::NotFound(format!("document {id} not found")))?;
        self.check_unique(&collection, &document)?;

        let updated_at = document.updated_at.unwrap_or_else(Utc::now);
        let stored = Document::hydrate(id, document.fields().clone(), created_at, updated_at);
        collection.documents.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: DocumentId) -> DomainResult<()> {
        let mut collection = self.lock()?;
        if collection.documents.remove(&id).is_none() {
            return Err(DomainError::NotFound(format!("document {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentReadRepository for InMemoryDocumentStore {
    async fn find_by_id(&self, id: DocumentId) -> DomainResult<Option<Document>> {
        Ok(self.lock()?.documents.get(&id).cloned())
    }

    async fn find_one_by(&self, field: &FieldName, value: &str) -> DomainResult<Option<Document>> {
        let collection = self.lock()?;
        Ok(collection
            .documents
            .values()
            .find(|doc| doc.get_str(field.as_str()) == Some(value))
            .cloned())
    }

    async fn find_many(&self, filter: &DocumentFilter) -> DomainResult<Vec<Document>> {
        let collection = self.lock()?;
        Ok(collection
            .documents
            .values()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect())
    }
}
