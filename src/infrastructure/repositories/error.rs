use crate::domain::document::{Document, FieldName};
use crate::domain::errors::DomainError;

/// Postgres truncates longer identifiers.
const MAX_IDENTIFIER_LEN: usize = 63;
const DIGEST_LEN: usize = 12;

/// A partial unique index backing one unique attribute of a collection.
#[derive(Debug, Clone)]
pub(super) struct UniqueIndex {
    pub name: String,
    pub field: FieldName,
}

impl UniqueIndex {
    pub fn new(collection: &FieldName, field: &FieldName) -> Self {
        Self {
            name: index_name(collection.as_str(), field.as_str()),
            field: field.clone(),
        }
    }
}

/// Lowercase, at most [`MAX_IDENTIFIER_LEN`] bytes, so the name Postgres
/// reports in a violation is exactly the one we created. Names that had to
/// be folded or shortened carry a digest of the original to stay distinct.
pub(super) fn index_name(collection: &str, field: &str) -> String {
    let full = format!("documents_{collection}_{field}_key");
    let folded = full.to_ascii_lowercase();
    if folded == full && full.len() <= MAX_IDENTIFIER_LEN {
        return full;
    }

    let digest = blake3::hash(full.as_bytes()).to_hex();
    let tag = &digest.as_str()[..DIGEST_LEN];
    let keep = folded.len().min(MAX_IDENTIFIER_LEN - DIGEST_LEN - 1);
    format!("{}_{tag}", &folded[..keep])
}

pub(super) fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("document not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Like [`map_sqlx`], but reports violations of a known unique index as a
/// duplicate on the attribute it backs.
pub(super) fn map_write_error(
    err: sqlx::Error,
    indexes: &[UniqueIndex],
    document: &Document,
) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(index) = db_err
            .constraint()
            .and_then(|constraint| indexes.iter().find(|i| i.name == constraint))
        {
            let value = document.get_str(index.field.as_str()).unwrap_or_default();
            return DomainError::duplicate_key(index.field.as_str(), value);
        }
    }
    map_sqlx(err)
}
