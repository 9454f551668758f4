//! Billing endpoints: billing records, outstanding balance, and phase 1 of
//! the payment-processor handshake.

use rentdesk_client::{ApiResult, FetchOutcome, QueryKey};
use tracing::{debug, info};

use crate::models::{
    BillingRecord, BillingRecordUpdate, BillingRunSummary, CreatePaymentIntent, NewBillingRecord,
    OutstandingBalance, PaymentIntent,
};

use super::Portal;

const COLLECTION: &str = "/api/billing-records";

/// Operations on billing records and payments.
#[derive(Debug)]
pub struct BillingApi<'a> {
    pub(crate) portal: &'a Portal,
}

impl BillingApi<'_> {
    /// List a tenant's billing records.
    pub async fn records_for_tenant(
        &self,
        tenant_id: &str,
    ) -> ApiResult<FetchOutcome<Vec<BillingRecord>>> {
        let key = QueryKey::path(format!("{}/{}", COLLECTION, tenant_id));
        self.portal.client.query().fetch(&key).await
    }

    /// Create a billing record (rent charge, fee).
    pub async fn create_record(&self, payload: &NewBillingRecord) -> ApiResult<BillingRecord> {
        payload.validate()?;
        debug!(tenant_id = %payload.tenant_id, "creating billing record");
        let created: BillingRecord = self.portal.client.post(COLLECTION, payload).await?;
        self.invalidate_tenant(&payload.tenant_id);
        Ok(created)
    }

    /// Amend a billing record.
    pub async fn update_record(
        &self,
        id: &str,
        payload: &BillingRecordUpdate,
    ) -> ApiResult<BillingRecord> {
        let path = format!("{}/{}", COLLECTION, id);
        let updated: BillingRecord = self.portal.client.put(&path, payload).await?;
        self.invalidate_tenant(&updated.tenant_id);
        Ok(updated)
    }

    /// Generate the current month's billing records.
    pub async fn generate_monthly(&self) -> ApiResult<BillingRunSummary> {
        let path = format!("{}/generate-monthly", COLLECTION);
        let summary: BillingRunSummary =
            self.portal.client.post(&path, &serde_json::json!({})).await?;
        info!(generated = summary.generated, "monthly billing generated");
        Ok(summary)
    }

    /// Run the automatic billing pass (generates and reconciles records).
    pub async fn run_automatic(&self) -> ApiResult<BillingRunSummary> {
        let path = format!("{}/run-automatic", COLLECTION);
        let summary: BillingRunSummary =
            self.portal.client.post(&path, &serde_json::json!({})).await?;
        info!(
            generated = summary.generated,
            updated = summary.updated.unwrap_or(0),
            "automatic billing run complete"
        );
        Ok(summary)
    }

    /// A tenant's outstanding balance across billing records and payments.
    pub async fn outstanding_balance(
        &self,
        tenant_id: &str,
    ) -> ApiResult<FetchOutcome<OutstandingBalance>> {
        let key = QueryKey::path(format!("/api/outstanding-balance/{}", tenant_id));
        self.portal.client.query().fetch(&key).await
    }

    /// Phase 1 of the payment handshake: create a payment intent and return
    /// the client secret for the processor SDK. Charge confirmation (phase 2)
    /// happens in the processor SDK, outside this client.
    pub async fn create_payment_intent(
        &self,
        payload: &CreatePaymentIntent,
    ) -> ApiResult<PaymentIntent> {
        payload.validate()?;
        debug!(amount = payload.amount, "creating payment intent");
        self.portal
            .client
            .post("/api/payments/create-intent", payload)
            .await
    }

    fn invalidate_tenant(&self, tenant_id: &str) {
        let query = self.portal.client.query();
        query.invalidate(&QueryKey::path(format!("{}/{}", COLLECTION, tenant_id)));
        query.invalidate(&QueryKey::path(format!(
            "/api/outstanding-balance/{}",
            tenant_id
        )));
    }
}
