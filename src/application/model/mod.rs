// src/application/model/mod.rs
mod definition;
mod queries;
mod service;

pub use definition::{ModelDefinition, SchemaPlugin, SlugAccessor};
pub use service::Model;
