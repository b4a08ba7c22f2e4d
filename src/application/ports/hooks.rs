// src/application/ports/hooks.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::document::{Document, DocumentReadRepository};
use crate::domain::errors::DomainResult;

/// What a hook can see of the collection the document is being written to.
#[derive(Clone)]
pub struct PersistContext {
    pub read_repo: Arc<dyn DocumentReadRepository>,
}

impl PersistContext {
    pub fn new(read_repo: Arc<dyn DocumentReadRepository>) -> Self {
        Self { read_repo }
    }
}

/// Runs before a document is committed; an error aborts the write.
#[async_trait]
pub trait BeforePersistHook: Send + Sync {
    async fn before_persist(&self, document: &mut Document, ctx: &PersistContext) -> DomainResult<()>;
}
