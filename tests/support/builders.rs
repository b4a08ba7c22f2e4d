// tests/support/builders.rs
use std::sync::Arc;

use serde_json::{Map, Value};

use docslug::application::model::{Model, ModelDefinition};
use docslug::application::slug::SlugPlugin;
use docslug::config::SlugOptions;
use docslug::domain::document::{DocumentReadRepository, FieldName};
use docslug::domain::schema::{AttributeSpec, Schema};
use docslug::infrastructure::repositories::InMemoryDocumentStore;
use docslug::infrastructure::util::AsciiSlugGenerator;

use super::mocks::DummyClock;

pub fn field(name: &str) -> FieldName {
    FieldName::new(name).expect("valid field name")
}

/// `{ name: String, description: String }` in collection `models`.
pub fn name_schema() -> Schema {
    Schema::new(field("models"))
        .attribute(field("name"), AttributeSpec::string())
        .and_then(|s| s.attribute(field("description"), AttributeSpec::string()))
        .expect("valid schema")
}

pub fn fields(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
        .collect()
}

pub fn named(name: &str) -> Map<String, Value> {
    fields(&[("name", name)])
}

pub fn slugged_definition(schema: Schema, options: SlugOptions) -> ModelDefinition {
    let mut definition = ModelDefinition::new(schema);
    definition
        .plugin(&SlugPlugin::new(options, Arc::new(AsciiSlugGenerator)))
        .expect("slug plugin applies");
    definition
}

pub struct TestModel {
    pub model: Model,
    pub store: Arc<InMemoryDocumentStore>,
}

/// A slugged model over an in-memory store; `reader` may wrap the store's
/// read side.
pub fn slugged_model_with_reader(
    schema: Schema,
    options: SlugOptions,
    reader: impl FnOnce(Arc<InMemoryDocumentStore>) -> Arc<dyn DocumentReadRepository>,
) -> TestModel {
    let definition = slugged_definition(schema, options);
    let store = Arc::new(InMemoryDocumentStore::new(definition.schema()));
    let read_repo = reader(Arc::clone(&store));
    let model = Model::new(definition, read_repo, store.clone(), Arc::new(DummyClock));
    TestModel { model, store }
}

pub fn slugged_model(options: SlugOptions) -> TestModel {
    slugged_model_with_reader(name_schema(), options, |store| {
        store as Arc<dyn DocumentReadRepository>
    })
}

pub fn slugged_model_for(schema: Schema, options: SlugOptions) -> TestModel {
    slugged_model_with_reader(schema, options, |store| {
        store as Arc<dyn DocumentReadRepository>
    })
}
