// src/infrastructure/repositories/mod.rs
mod error;
mod in_memory;
mod postgres_document;

pub use in_memory::InMemoryDocumentStore;
pub use postgres_document::PostgresDocumentStore;
