use crate::domain::document::entity::Document;
use crate::domain::document::value_objects::{DocumentId, FieldName};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// A single condition on one string attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMatch {
    Equals(String),
    StartsWith(String),
}

impl FieldMatch {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldMatch::Equals(expected) => value == expected,
            FieldMatch::StartsWith(prefix) => value.starts_with(prefix.as_str()),
        }
    }
}

/// Documents whose `field` satisfies any of `any_of`, optionally skipping one id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFilter {
    pub field: FieldName,
    pub any_of: Vec<FieldMatch>,
    pub exclude_id: Option<DocumentId>,
}

impl DocumentFilter {
    pub fn new(field: FieldName) -> Self {
        Self {
            field,
            any_of: Vec::new(),
            exclude_id: None,
        }
    }

    pub fn equals(mut self, value: impl Into<String>) -> Self {
        self.any_of.push(FieldMatch::Equals(value.into()));
        self
    }

    pub fn starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.any_of.push(FieldMatch::StartsWith(prefix.into()));
        self
    }

    pub fn excluding(mut self, id: Option<DocumentId>) -> Self {
        self.exclude_id = id;
        self
    }

    /// In-process evaluation, for stores without a native query language.
    pub fn matches(&self, document: &Document) -> bool {
        if self.exclude_id.is_some() && document.id() == self.exclude_id {
            return false;
        }
        let Some(value) = document.get_str(self.field.as_str()) else {
            return false;
        };
        self.any_of.iter().any(|m| m.matches(value))
    }
}

#[async_trait]
pub trait DocumentWriteRepository: Send + Sync {
    async fn insert(&self, document: Document) -> DomainResult<Document>;
    async fn update(&self, document: Document) -> DomainResult<Document>;
    async fn delete(&self, id: DocumentId) -> DomainResult<()>;
}

#[async_trait]
pub trait DocumentReadRepository: Send + Sync {
    async fn find_by_id(&self, id: DocumentId) -> DomainResult<Option<Document>>;
    async fn find_one_by(&self, field: &FieldName, value: &str) -> DomainResult<Option<Document>>;
    async fn find_many(&self, filter: &DocumentFilter) -> DomainResult<Vec<Document>>;
}
