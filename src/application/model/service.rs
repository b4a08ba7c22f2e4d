// src/application/model/service.rs
use std::sync::Arc;

use serde_json::{Map, Value};

use super::ModelDefinition;
use crate::{
    application::{
        error::ApplicationResult,
        ports::{hooks::PersistContext, time::Clock},
    },
    domain::{
        document::{Document, DocumentReadRepository, DocumentWriteRepository},
        errors::DomainResult,
    },
};

/// A model definition bound to the collection it persists into.
pub struct Model {
    pub(super) definition: Arc<ModelDefinition>,
    pub(super) read_repo: Arc<dyn DocumentReadRepository>,
    pub(super) write_repo: Arc<dyn DocumentWriteRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl Model {
    pub fn new(
        definition: ModelDefinition,
        read_repo: Arc<dyn DocumentReadRepository>,
        write_repo: Arc<dyn DocumentWriteRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            definition: Arc::new(definition),
            read_repo,
            write_repo,
            clock,
        }
    }

    pub fn definition(&self) -> &ModelDefinition {
        &self.definition
    }

    pub async fn create(&self, fields: Map<String, Value>) -> ApplicationResult<Document> {
        self.save(Document::from_fields(fields)).await
    }

    /// Runs the before-persist hooks, validates and writes `document`.
    ///
    /// A hook failure aborts before anything is written. When the store
    /// rejects the slug as a duplicate (a concurrent writer claimed it after
    /// the hook looked), the hooks run again against the fresh state.
    pub async fn save(&self, mut document: Document) -> ApplicationResult<Document> {
        let ctx = PersistContext::new(Arc::clone(&self.read_repo));
        let accessor = self.definition.slug_accessor();
        let max_retries = accessor.map_or(0, |a| a.conflict_retries);
        let mut attempt = 0u32;

        loop {
            for hook in self.definition.hooks() {
                hook.before_persist(&mut document, &ctx).await?;
            }
            self.definition.schema().validate(&document)?;

            match self.write(document.clone()).await {
                Ok(saved) => return Ok(saved),
                Err(err)
                    if attempt < max_retries
                        && accessor.is_some_and(|a| err.is_duplicate_on(a.slug_field.as_str())) =>
                {
                    attempt += 1;
                    tracing::warn!(
                        collection = %self.definition.schema().collection(),
                        attempt,
                        error = %err,
                        "slug claimed concurrently, resolving again"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn write(&self, mut document: Document) -> DomainResult<Document> {
        let now = self.clock.now();
        document.updated_at = Some(now);
        if document.is_new() {
            document.created_at = Some(now);
            self.write_repo.insert(document).await
        } else {
            self.write_repo.update(document).await
        }
    }
}
