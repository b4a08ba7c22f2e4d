// src/application/model/definition.rs
use std::sync::Arc;

use crate::{
    application::{error::ApplicationResult, ports::hooks::BeforePersistHook},
    domain::{
        document::FieldName,
        errors::DomainResult,
        schema::{AttributeSpec, Schema},
    },
};

/// Extends a model definition at definition time.
///
/// Implementations must check everything before touching `definition`, so a
/// failed `apply` leaves it exactly as it was.
pub trait SchemaPlugin {
    fn apply(&self, definition: &mut ModelDefinition) -> ApplicationResult<()>;
}

/// Exposes `find_by_slug` on the bound model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugAccessor {
    pub slug_field: FieldName,
    pub conflict_retries: u32,
}

/// Schema plus the lifecycle hooks and accessors plugins attached to it.
pub struct ModelDefinition {
    schema: Schema,
    hooks: Vec<Arc<dyn BeforePersistHook>>,
    slug_accessor: Option<SlugAccessor>,
}

impl ModelDefinition {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            hooks: Vec::new(),
            slug_accessor: None,
        }
    }

    pub fn plugin(&mut self, plugin: &impl SchemaPlugin) -> ApplicationResult<&mut Self> {
        plugin.apply(self)?;
        Ok(self)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn declare_attribute(&mut self, name: FieldName, spec: AttributeSpec) -> DomainResult<()> {
        self.schema.declare_attribute(name, spec)
    }

    pub fn hooks(&self) -> &[Arc<dyn BeforePersistHook>] {
        &self.hooks
    }

    pub fn add_hook(&mut self, hook: Arc<dyn BeforePersistHook>) {
        self.hooks.push(hook);
    }

    pub fn slug_accessor(&self) -> Option<&SlugAccessor> {
        self.slug_accessor.as_ref()
    }

    pub fn register_slug_accessor(&mut self, accessor: SlugAccessor) {
        self.slug_accessor = Some(accessor);
    }
}
