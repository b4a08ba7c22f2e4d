// src/domain/slug/services.rs
use std::sync::Arc;

use crate::domain::document::{DocumentFilter, DocumentId, DocumentReadRepository, FieldName, Slug};
use crate::domain::errors::{DomainError, DomainResult};

/// The persisted document a slug is being resolved for, when updating.
#[derive(Debug, Clone, Copy)]
pub struct SlugOwner<'a> {
    pub id: DocumentId,
    pub current: Option<&'a str>,
}

/// Domain service responsible for producing collection-unique slugs.
pub struct SlugService {
    read_repo: Arc<dyn DocumentReadRepository>,
    slug_field: FieldName,
}

impl SlugService {
    pub fn new(read_repo: Arc<dyn DocumentReadRepository>, slug_field: FieldName) -> Self {
        Self {
            read_repo,
            slug_field,
        }
    }

    /// Returns `base` if no other document uses it, otherwise `base-(N+1)`
    /// where `N` is the highest suffix currently taken (a bare `base` counts
    /// as 1). Gaps below `N` are never backfilled.
    ///
    /// When `owner.current` is given, an update whose suffixed slug is still
    /// in the family keeps it as long as the bare base is held by someone else.
    pub async fn generate_unique_slug(
        &self,
        base: &Slug,
        owner: Option<SlugOwner<'_>>,
    ) -> DomainResult<Slug> {
        let filter = DocumentFilter::new(self.slug_field.clone())
            .equals(base.as_str())
            .starts_with(format!("{base}-"))
            .excluding(owner.map(|o| o.id));

        let existing = self.read_repo.find_many(&filter).await?;
        let taken: Vec<&str> = existing
            .iter()
            .filter_map(|doc| doc.get_str(self.slug_field.as_str()))
            .collect();

        if let Some(current) = owner.and_then(|o| o.current) {
            if keeps_current(base.as_str(), current, &taken) {
                return Slug::new(current);
            }
        }

        let highest = taken
            .iter()
            .filter_map(|slug| suffix_of(base.as_str(), slug))
            .max();

        match highest {
            None => Ok(base.clone()),
            Some(n) => n.checked_add(1).map(|next| base.with_suffix(next)).ok_or_else(|| {
                DomainError::Conflict(format!("slug suffix space exhausted for {base}"))
            }),
        }
    }
}

/// An update may keep a suffixed slug of the same family only while another
/// document holds the bare base and nobody else holds the current value.
fn keeps_current(base: &str, current: &str, taken: &[&str]) -> bool {
    current != base
        && suffix_of(base, current).is_some()
        && taken.contains(&base)
        && !taken.contains(&current)
}

/// Position of `candidate` within the family of `base`: `base` itself is 1,
/// `base-N` is `N`; anything else is outside the family.
pub(crate) fn suffix_of(base: &str, candidate: &str) -> Option<u64> {
    if candidate == base {
        return Some(1);
    }
    let digits = candidate.strip_prefix(base)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok().filter(|n| *n > 0)
}
