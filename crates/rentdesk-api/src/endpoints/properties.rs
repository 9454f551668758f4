//! Property endpoints.

use rentdesk_client::{ApiResult, FetchOutcome, QueryKey};
use tracing::debug;

use crate::models::{Deleted, NewProperty, Property};

use super::Portal;

const COLLECTION: &str = "/api/properties";

/// Operations on properties.
#[derive(Debug)]
pub struct PropertiesApi<'a> {
    pub(crate) portal: &'a Portal,
}

impl PropertiesApi<'_> {
    /// List all properties visible to the current user.
    pub async fn list(&self) -> ApiResult<FetchOutcome<Vec<Property>>> {
        let key = QueryKey::path(COLLECTION);
        self.portal.client.query().fetch(&key).await
    }

    /// Fetch a single property.
    pub async fn get(&self, id: &str) -> ApiResult<FetchOutcome<Property>> {
        let key = QueryKey::path(format!("{}/{}", COLLECTION, id));
        self.portal.client.query().fetch(&key).await
    }

    /// Create a property.
    pub async fn create(&self, payload: &NewProperty) -> ApiResult<Property> {
        payload.validate()?;
        debug!(name = %payload.name, "creating property");
        let created: Property = self.portal.client.post(COLLECTION, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        Ok(created)
    }

    /// Replace a property.
    pub async fn update(&self, id: &str, payload: &NewProperty) -> ApiResult<Property> {
        payload.validate()?;
        let path = format!("{}/{}", COLLECTION, id);
        let updated: Property = self.portal.client.put(&path, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        self.portal.client.query().invalidate(&QueryKey::path(path));
        Ok(updated)
    }

    /// Delete a property.
    pub async fn delete(&self, id: &str) -> ApiResult<Deleted> {
        let path = format!("{}/{}", COLLECTION, id);
        let deleted: Deleted = self.portal.client.delete(&path).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        self.portal.client.query().invalidate(&QueryKey::path(path));
        Ok(deleted)
    }
}
