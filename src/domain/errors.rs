// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("duplicate value {value:?} for unique field {field}")]
    DuplicateKey { field: String, value: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn duplicate_key(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::DuplicateKey {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether this error is a unique-index violation on `field`.
    pub fn is_duplicate_on(&self, field: &str) -> bool {
        matches!(self, Self::DuplicateKey { field: f, .. } if f == field)
    }
}
