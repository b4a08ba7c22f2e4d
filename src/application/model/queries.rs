use super::Model;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::document::{Document, DocumentId},
};

impl Model {
    pub async fn find_by_id(&self, id: DocumentId) -> ApplicationResult<Option<Document>> {
        Ok(self.read_repo.find_by_id(id).await?)
    }

    /// Exact match on the slug attribute; no normalisation is applied to `slug`.
    pub async fn find_by_slug(&self, slug: &str) -> ApplicationResult<Option<Document>> {
        let accessor = self.definition.slug_accessor().ok_or_else(|| {
            ApplicationError::unsupported("find_by_slug requires the slug plugin")
        })?;

        Ok(self.read_repo.find_one_by(&accessor.slug_field, slug).await?)
    }

    pub async fn delete(&self, id: DocumentId) -> ApplicationResult<()> {
        Ok(self.write_repo.delete(id).await?)
    }
}
