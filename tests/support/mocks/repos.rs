// tests/support/mocks/repos.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use docslug::domain::document::{
    Document, DocumentFilter, DocumentId, DocumentReadRepository, FieldName,
};
use docslug::domain::errors::{DomainError, DomainResult};

/* -------------------------------- FailingReadRepo -------------------------------- */

/// Every query fails as if the database were unreachable.
pub struct FailingReadRepo;

fn unreachable_db() -> DomainError {
    DomainError::Persistence("connection refused".into())
}

#[async_trait]
impl DocumentReadRepository for FailingReadRepo {
    async fn find_by_id(&self, _id: DocumentId) -> DomainResult<Option<Document>> {
        Err(unreachable_db())
    }

    async fn find_one_by(&self, _field: &FieldName, _value: &str) -> DomainResult<Option<Document>> {
        Err(unreachable_db())
    }

    async fn find_many(&self, _filter: &DocumentFilter) -> DomainResult<Vec<Document>> {
        Err(unreachable_db())
    }
}

/* -------------------------------- StaleReadRepo -------------------------------- */

/// Answers the first `stale_reads` collision queries with nothing, the way a
/// reader racing a concurrent writer would, then delegates.
pub struct StaleReadRepo {
    inner: Arc<dyn DocumentReadRepository>,
    stale_reads: AtomicUsize,
}

impl StaleReadRepo {
    pub fn new(inner: Arc<dyn DocumentReadRepository>, stale_reads: usize) -> Self {
        Self {
            inner,
            stale_reads: AtomicUsize::new(stale_reads),
        }
    }
}

#[async_trait]
impl DocumentReadRepository for StaleReadRepo {
    async fn find_by_id(&self, id: DocumentId) -> DomainResult<Option<Document>> {
        self.inner.find_by_id(id).await
    }

    async fn find_one_by(&self, field: &FieldName, value: &str) -> DomainResult<Option<Document>> {
        self.inner.find_one_by(field, value).await
    }

    async fn find_many(&self, filter: &DocumentFilter) -> DomainResult<Vec<Document>> {
        let stale = self
            .stale_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if stale {
            return Ok(vec![]);
        }
        self.inner.find_many(filter).await
    }
}

/* -------------------------------- CountingReadRepo -------------------------------- */

/// Delegates and counts collision queries.
pub struct CountingReadRepo {
    inner: Arc<dyn DocumentReadRepository>,
    find_many_calls: AtomicUsize,
}

impl CountingReadRepo {
    pub fn new(inner: Arc<dyn DocumentReadRepository>) -> Self {
        Self {
            inner,
            find_many_calls: AtomicUsize::new(0),
        }
    }

    pub fn find_many_calls(&self) -> usize {
        self.find_many_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentReadRepository for CountingReadRepo {
    async fn find_by_id(&self, id: DocumentId) -> DomainResult<Option<Document>> {
        self.inner.find_by_id(id).await
    }

    async fn find_one_by(&self, field: &FieldName, value: &str) -> DomainResult<Option<Document>> {
        self.inner.find_one_by(field, value).await
    }

    async fn find_many(&self, filter: &DocumentFilter) -> DomainResult<Vec<Document>> {
        self.find_many_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_many(filter).await
    }
}
