//! Tenant endpoints.

use rentdesk_client::{ApiResult, FetchOutcome, QueryKey};
use tracing::debug;

use crate::models::{NewTenant, Tenant};

use super::Portal;

const COLLECTION: &str = "/api/tenants";

/// Operations on tenants.
#[derive(Debug)]
pub struct TenantsApi<'a> {
    pub(crate) portal: &'a Portal,
}

impl TenantsApi<'_> {
    /// List all tenants visible to the current user.
    pub async fn list(&self) -> ApiResult<FetchOutcome<Vec<Tenant>>> {
        let key = QueryKey::path(COLLECTION);
        self.portal.client.query().fetch(&key).await
    }

    /// Fetch a single tenant.
    pub async fn get(&self, id: &str) -> ApiResult<FetchOutcome<Tenant>> {
        let key = QueryKey::path(format!("{}/{}", COLLECTION, id));
        self.portal.client.query().fetch(&key).await
    }

    /// Create a tenant.
    pub async fn create(&self, payload: &NewTenant) -> ApiResult<Tenant> {
        payload.validate()?;
        debug!(first_name = %payload.first_name, "creating tenant");
        let created: Tenant = self.portal.client.post(COLLECTION, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        Ok(created)
    }

    /// Replace a tenant.
    pub async fn update(&self, id: &str, payload: &NewTenant) -> ApiResult<Tenant> {
        payload.validate()?;
        let path = format!("{}/{}", COLLECTION, id);
        let updated: Tenant = self.portal.client.put(&path, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        self.portal.client.query().invalidate(&QueryKey::path(path));
        Ok(updated)
    }
}
