pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::Document;
pub use repository::{DocumentFilter, DocumentReadRepository, DocumentWriteRepository, FieldMatch};
pub use value_objects::{DocumentId, FieldName, Slug};
