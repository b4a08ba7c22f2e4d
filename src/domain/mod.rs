pub mod document;
pub mod errors;
pub mod schema;
pub mod slug;

pub use errors::{DomainError, DomainResult};
