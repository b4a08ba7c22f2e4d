// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Raised while attaching a plugin to a model definition. The definition is
/// left exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Field does not exist in schema")]
    SourceFieldMissing { field: String },

    #[error("Slug field already exists in schema")]
    SlugFieldCollision { field: String },
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl ApplicationError {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}
