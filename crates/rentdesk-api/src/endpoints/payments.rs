//! Rent payment endpoints.

use rentdesk_client::{ApiResult, FetchOutcome, QueryKey};
use tracing::debug;

use crate::models::{NewRentPayment, RentPayment, RentPaymentUpdate};

use super::Portal;

const COLLECTION: &str = "/api/rent-payments";

/// Operations on recorded rent payments.
#[derive(Debug)]
pub struct RentPaymentsApi<'a> {
    pub(crate) portal: &'a Portal,
}

impl RentPaymentsApi<'_> {
    /// List all rent payments visible to the current user.
    pub async fn list(&self) -> ApiResult<FetchOutcome<Vec<RentPayment>>> {
        let key = QueryKey::path(COLLECTION);
        self.portal.client.query().fetch(&key).await
    }

    /// Record a payment. Affects the tenant's outstanding balance.
    pub async fn create(&self, payload: &NewRentPayment) -> ApiResult<RentPayment> {
        payload.validate()?;
        debug!(tenant_id = %payload.tenant_id, "recording rent payment");
        let created: RentPayment = self.portal.client.post(COLLECTION, payload).await?;

        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        self.portal.client.query().invalidate(&QueryKey::path(format!(
            "/api/outstanding-balance/{}",
            payload.tenant_id
        )));
        self.portal.client.query().invalidate(&QueryKey::path(format!(
            "/api/billing-records/{}",
            payload.tenant_id
        )));
        Ok(created)
    }

    /// Amend a recorded payment.
    pub async fn update(&self, id: &str, payload: &RentPaymentUpdate) -> ApiResult<RentPayment> {
        let path = format!("{}/{}", COLLECTION, id);
        let updated: RentPayment = self.portal.client.put(&path, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        Ok(updated)
    }
}
