// src/infrastructure/repositories/postgres_document.rs
use super::error::{UniqueIndex, map_sqlx, map_write_error};
use crate::domain::document::{
    Document, DocumentFilter, DocumentId, DocumentReadRepository, DocumentWriteRepository,
    FieldMatch, FieldName,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::schema::Schema;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, types::Json};

const RETURNING: &str = " RETURNING id, data, created_at, updated_at";

/// One collection stored as JSONB rows of the shared `documents` table.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
    collection: String,
    unique_indexes: Vec<UniqueIndex>,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool, schema: &Schema) -> Self {
        let unique_indexes = schema
            .unique_attributes()
            .map(|field| UniqueIndex::new(schema.collection(), field))
            .collect();
        Self {
            pool,
            collection: schema.collection().as_str().to_string(),
            unique_indexes,
        }
    }

    /// Creates one partial unique index per unique attribute. Empty values
    /// are not indexed, matching the in-memory store.
    pub async fn ensure_indexes(&self) -> DomainResult<()> {
        for index in &self.unique_indexes {
            // Collection and field names are validated identifiers.
            let statement = format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS \"{name}\" ON documents ((data->>'{field}')) \
                 WHERE collection = '{collection}' AND data->>'{field}' <> ''",
                name = index.name,
                field = index.field,
                collection = self.collection,
            );
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx)?;
            tracing::debug!(index = %index.name, "ensured unique index");
        }
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: i64,
    data: Json<Map<String, Value>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = DomainError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        Ok(Document::hydrate(
            DocumentId::new(row.id)?,
            row.data.0,
            row.created_at,
            row.updated_at,
        ))
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl DocumentWriteRepository for PostgresDocumentStore {
    async fn insert(&self, document: Document) -> DomainResult<Document> {
        if !document.is_new() {
            return Err(DomainError::Conflict("document is already persisted".into()));
        }
        let created_at = document.created_at.unwrap_or_else(Utc::now);
        let updated_at = document.updated_at.unwrap_or(created_at);

        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "INSERT INTO documents (collection, data, created_at, updated_at)
             VALUES ($1, $2, $3, $4){RETURNING}"
        ))
        .bind(&self.collection)
        .bind(Json(document.fields()))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_write_error(err, &self.unique_indexes, &document))?;

        Document::try_from(row)
    }

    async fn update(&self, document: Document) -> DomainResult<Document> {
        let id = document
            .id()
            .ok_or_else(|| DomainError::NotFound("document has not been persisted".into()))?;
        let updated_at = document.updated_at.unwrap_or_else(Utc::now);

        let maybe_row = sqlx::query_as::<_, DocumentRow>(&format!(
            "UPDATE documents SET data = $1, updated_at = $2
             WHERE id = $3 AND collection = $4{RETURNING}"
        ))
        .bind(Json(document.fields()))
        .bind(updated_at)
        .bind(i64::from(id))
        .bind(&self.collection)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_write_error(err, &self.unique_indexes, &document))?;

        let row = maybe_row.ok_or_else(|| DomainError::NotFound(format!("document {id} not found")))?;
        Document::try_from(row)
    }

    async fn delete(&self, id: DocumentId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND collection = $2")
            .bind(i64::from(id))
            .bind(&self.collection)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("document {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentReadRepository for PostgresDocumentStore {
    async fn find_by_id(&self, id: DocumentId) -> DomainResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data, created_at, updated_at
             FROM documents WHERE id = $1 AND collection = $2",
        )
        .bind(i64::from(id))
        .bind(&self.collection)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Document::try_from).transpose()
    }

    async fn find_one_by(&self, field: &FieldName, value: &str) -> DomainResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data, created_at, updated_at
             FROM documents WHERE collection = $1 AND data->>$2 = $3
             ORDER BY id LIMIT 1",
        )
        .bind(&self.collection)
        .bind(field.as_str())
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Document::try_from).transpose()
    }

    async fn find_many(&self, filter: &DocumentFilter) -> DomainResult<Vec<Document>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, data, created_at, updated_at FROM documents WHERE collection = ",
        );
        builder.push_bind(self.collection.as_str());

        if filter.any_of.is_empty() {
            builder.push(" AND FALSE");
        } else {
            builder.push(" AND (");
            for (i, condition) in filter.any_of.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                builder.push("data->>");
                builder.push_bind(filter.field.as_str());
                match condition {
                    FieldMatch::Equals(value) => {
                        builder.push(" = ");
                        builder.push_bind(value.as_str());
                    }
                    FieldMatch::StartsWith(prefix) => {
                        builder.push(" LIKE ");
                        builder.push_bind(format!("{}%", escape_like(prefix)));
                        builder.push(" ESCAPE '\\'");
                    }
                }
            }
            builder.push(")");
        }

        if let Some(id) = filter.exclude_id {
            builder.push(" AND id <> ");
            builder.push_bind(i64::from(id));
        }
        builder.push(" ORDER BY id");

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Document::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("my-model-"), "my-model-");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
