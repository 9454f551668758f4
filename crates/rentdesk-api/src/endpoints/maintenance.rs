//! Maintenance request endpoints.

use rentdesk_client::{ApiResult, FetchOutcome, QueryKey};

use crate::models::{MaintenanceRequest, MaintenanceUpdate, NewMaintenanceRequest};

use super::Portal;

const COLLECTION: &str = "/api/maintenance-requests";

/// Operations on maintenance requests.
#[derive(Debug)]
pub struct MaintenanceApi<'a> {
    pub(crate) portal: &'a Portal,
}

impl MaintenanceApi<'_> {
    pub async fn list(&self) -> ApiResult<FetchOutcome<Vec<MaintenanceRequest>>> {
        let key = QueryKey::path(COLLECTION);
        self.portal.client.query().fetch(&key).await
    }

    /// File a new request.
    pub async fn file(&self, payload: &NewMaintenanceRequest) -> ApiResult<MaintenanceRequest> {
        payload.validate()?;
        let created: MaintenanceRequest = self.portal.client.post(COLLECTION, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        Ok(created)
    }

    /// Update status or priority.
    pub async fn update(
        &self,
        id: &str,
        payload: &MaintenanceUpdate,
    ) -> ApiResult<MaintenanceRequest> {
        let path = format!("{}/{}", COLLECTION, id);
        let updated: MaintenanceRequest = self.portal.client.put(&path, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        Ok(updated)
    }
}
