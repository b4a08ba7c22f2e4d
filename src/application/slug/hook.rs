// src/application/slug/hook.rs
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    application::ports::{
        hooks::{BeforePersistHook, PersistContext},
        util::SlugGenerator,
    },
    config::RegeneratePolicy,
    domain::{
        document::{Document, FieldName, Slug},
        errors::DomainResult,
        slug::{SlugOwner, SlugService},
    },
};

/// Writes a collection-unique slug derived from the source attribute.
pub struct SlugAssignmentHook {
    source_field: FieldName,
    slug_field: FieldName,
    policy: RegeneratePolicy,
    generator: Arc<dyn SlugGenerator>,
}

impl SlugAssignmentHook {
    pub fn new(
        source_field: FieldName,
        slug_field: FieldName,
        policy: RegeneratePolicy,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            source_field,
            slug_field,
            policy,
            generator,
        }
    }

    fn source_text(&self, document: &Document) -> Option<String> {
        match document.get(self.source_field.as_str())? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn should_regenerate(&self, document: &Document) -> bool {
        if document.is_new() {
            return true;
        }
        match self.policy {
            RegeneratePolicy::Always => true,
            RegeneratePolicy::OnSourceChange => {
                document.is_modified(self.source_field.as_str())
                    || document
                        .get_str(self.slug_field.as_str())
                        .is_none_or(str::is_empty)
            }
        }
    }
}

#[async_trait]
impl BeforePersistHook for SlugAssignmentHook {
    async fn before_persist(&self, document: &mut Document, ctx: &PersistContext) -> DomainResult<()> {
        let Some(source) = self.source_text(document) else {
            return Ok(());
        };
        if !self.should_regenerate(document) {
            return Ok(());
        }

        let derived = self.generator.slugify(&source);
        if derived.is_empty() {
            tracing::debug!(source = %source, "source derives to an empty slug, leaving slug unchanged");
            return Ok(());
        }
        let base = Slug::new(derived)?;

        let service = SlugService::new(Arc::clone(&ctx.read_repo), self.slug_field.clone());
        // `Always` reallocates from scratch on every save.
        let current = match self.policy {
            RegeneratePolicy::OnSourceChange => document.get_str(self.slug_field.as_str()),
            RegeneratePolicy::Always => None,
        };
        let owner = document.id().map(|id| SlugOwner { id, current });
        let slug = service.generate_unique_slug(&base, owner).await?;

        tracing::debug!(
            field = %self.slug_field,
            base = %base,
            slug = %slug,
            "assigned slug"
        );
        document.set(self.slug_field.as_str(), String::from(slug));
        Ok(())
    }
}
