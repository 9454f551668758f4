//! Document endpoints.

use rentdesk_client::{ApiResult, FetchOutcome, QueryKey};

use crate::models::{Deleted, Document, NewDocument};

use super::Portal;

const COLLECTION: &str = "/api/documents";

/// Operations on stored documents.
#[derive(Debug)]
pub struct DocumentsApi<'a> {
    pub(crate) portal: &'a Portal,
}

impl DocumentsApi<'_> {
    pub async fn list(&self) -> ApiResult<FetchOutcome<Vec<Document>>> {
        let key = QueryKey::path(COLLECTION);
        self.portal.client.query().fetch(&key).await
    }

    /// Register a document (the file itself is uploaded out of band).
    pub async fn create(&self, payload: &NewDocument) -> ApiResult<Document> {
        payload.validate()?;
        let created: Document = self.portal.client.post(COLLECTION, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Deleted> {
        let path = format!("{}/{}", COLLECTION, id);
        let deleted: Deleted = self.portal.client.delete(&path).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        Ok(deleted)
    }
}
