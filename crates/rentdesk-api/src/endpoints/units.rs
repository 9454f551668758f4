//! Unit endpoints.

use rentdesk_client::{ApiResult, FetchOutcome, QueryKey};

use crate::models::{NewUnit, Unit};

use super::Portal;

/// Operations on rentable units.
#[derive(Debug)]
pub struct UnitsApi<'a> {
    pub(crate) portal: &'a Portal,
}

impl UnitsApi<'_> {
    /// List the units of a property.
    pub async fn for_property(&self, property_id: &str) -> ApiResult<FetchOutcome<Vec<Unit>>> {
        let key = QueryKey::path(format!("/api/properties/{}/units", property_id));
        self.portal.client.query().fetch(&key).await
    }

    /// Fetch a single unit.
    pub async fn get(&self, id: &str) -> ApiResult<FetchOutcome<Unit>> {
        let key = QueryKey::path(format!("/api/units/{}", id));
        self.portal.client.query().fetch(&key).await
    }

    /// Create a unit.
    pub async fn create(&self, payload: &NewUnit) -> ApiResult<Unit> {
        payload.validate()?;
        let created: Unit = self.portal.client.post("/api/units", payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(format!(
            "/api/properties/{}/units",
            payload.property_id
        )));
        Ok(created)
    }

    /// Replace a unit.
    pub async fn update(&self, id: &str, payload: &NewUnit) -> ApiResult<Unit> {
        payload.validate()?;
        let path = format!("/api/units/{}", id);
        let updated: Unit = self.portal.client.put(&path, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(path));
        self.portal.client.query().invalidate(&QueryKey::path(format!(
            "/api/properties/{}/units",
            payload.property_id
        )));
        Ok(updated)
    }
}
