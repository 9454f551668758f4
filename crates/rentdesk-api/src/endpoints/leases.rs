//! Lease endpoints.

use rentdesk_client::{ApiResult, FetchOutcome, QueryKey};

use crate::models::{Lease, NewLease};

use super::Portal;

const COLLECTION: &str = "/api/leases";

/// Operations on leases.
#[derive(Debug)]
pub struct LeasesApi<'a> {
    pub(crate) portal: &'a Portal,
}

impl LeasesApi<'_> {
    pub async fn list(&self) -> ApiResult<FetchOutcome<Vec<Lease>>> {
        let key = QueryKey::path(COLLECTION);
        self.portal.client.query().fetch(&key).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<FetchOutcome<Lease>> {
        let key = QueryKey::path(format!("{}/{}", COLLECTION, id));
        self.portal.client.query().fetch(&key).await
    }

    /// Create a lease binding a tenant to a unit.
    pub async fn create(&self, payload: &NewLease) -> ApiResult<Lease> {
        payload.validate()?;
        let created: Lease = self.portal.client.post(COLLECTION, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        Ok(created)
    }

    /// Replace a lease (renewal, termination).
    pub async fn update(&self, id: &str, payload: &NewLease) -> ApiResult<Lease> {
        payload.validate()?;
        let path = format!("{}/{}", COLLECTION, id);
        let updated: Lease = self.portal.client.put(&path, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        self.portal.client.query().invalidate(&QueryKey::path(path));
        Ok(updated)
    }
}
