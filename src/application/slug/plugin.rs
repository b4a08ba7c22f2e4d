// src/application/slug/plugin.rs
use std::sync::Arc;

use super::SlugAssignmentHook;
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult, RegistrationError},
        model::{ModelDefinition, SchemaPlugin, SlugAccessor},
        ports::util::SlugGenerator,
    },
    config::SlugOptions,
    domain::{document::FieldName, schema::AttributeSpec},
};

/// Adds a generated slug attribute, the hook maintaining it and the
/// `find_by_slug` accessor.
pub struct SlugPlugin {
    options: SlugOptions,
    generator: Arc<dyn SlugGenerator>,
}

impl SlugPlugin {
    pub fn new(options: SlugOptions, generator: Arc<dyn SlugGenerator>) -> Self {
        Self { options, generator }
    }

    pub fn options(&self) -> &SlugOptions {
        &self.options
    }
}

impl SchemaPlugin for SlugPlugin {
    fn apply(&self, definition: &mut ModelDefinition) -> ApplicationResult<()> {
        let SlugOptions {
            source_field,
            slug_field,
            regenerate,
            conflict_retries,
        } = &self.options;

        let schema = definition.schema();
        if !schema.has_attribute(source_field) {
            return Err(RegistrationError::SourceFieldMissing {
                field: source_field.clone(),
            }
            .into());
        }
        if schema.has_attribute(slug_field) {
            return Err(RegistrationError::SlugFieldCollision {
                field: slug_field.clone(),
            }
            .into());
        }
        if definition.slug_accessor().is_some() {
            return Err(ApplicationError::unsupported(
                "a slug accessor is already registered on this model",
            ));
        }

        let source = FieldName::new(source_field.as_str())?;
        let slug = FieldName::new(slug_field.as_str())?;

        definition.declare_attribute(slug.clone(), AttributeSpec::string().unique())?;
        definition.add_hook(Arc::new(SlugAssignmentHook::new(
            source,
            slug.clone(),
            *regenerate,
            Arc::clone(&self.generator),
        )));
        definition.register_slug_accessor(SlugAccessor {
            slug_field: slug,
            conflict_retries: *conflict_retries,
        });

        tracing::debug!(
            collection = %definition.schema().collection(),
            source = %source_field,
            slug = %slug_field,
            "slug plugin registered"
        );
        Ok(())
    }
}
