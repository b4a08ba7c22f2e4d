use crate::domain::document::value_objects::DocumentId;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// One record of a modelled collection.
///
/// A document without an id has never been persisted. Every `set` marks the
/// attribute as modified until the store hands back a fresh, hydrated copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    id: Option<DocumentId>,
    fields: Map<String, Value>,
    modified: BTreeSet<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new document whose attributes all count as modified.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let modified = fields.keys().cloned().collect();
        Self {
            id: None,
            fields,
            modified,
            created_at: None,
            updated_at: None,
        }
    }

    /// Persisted state as read back from a store.
    pub fn hydrate(
        id: DocumentId,
        fields: Map<String, Value>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            fields,
            modified: BTreeSet::new(),
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }

    pub fn id(&self) -> Option<DocumentId> {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        self.modified.insert(field.clone());
        self.fields.insert(field, value.into());
    }

    pub fn is_modified(&self, field: &str) -> bool {
        self.modified.contains(field)
    }

    pub fn modified_fields(&self) -> impl Iterator<Item = &str> {
        self.modified.iter().map(String::as_str)
    }
}
