//! Wire records for the portal backend.
//!
//! The backend speaks camelCase JSON; amounts travel as strings and dates as
//! ISO-8601 strings. Records are validated for shape at the network boundary
//! (serde) and otherwise treated as backend-owned.

use serde::{Deserialize, Serialize};

use rentdesk_client::{ApiError, ApiResult};

/// A managed property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,

    #[serde(default)]
    pub organization_id: Option<String>,

    pub name: String,

    pub address: String,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub zip_code: Option<String>,

    /// Backend-defined kind (e.g. "apartment", "single_family").
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for creating a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub name: String,

    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl NewProperty {
    /// Form-level validation; never dispatched when it fails.
    pub fn validate(&self) -> ApiResult<()> {
        require(&self.name, "name")?;
        require(&self.address, "address")
    }
}

/// A rentable unit within a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,

    pub property_id: String,

    pub unit_number: String,

    #[serde(default)]
    pub bedrooms: Option<u32>,

    #[serde(default)]
    pub bathrooms: Option<u32>,

    /// Monthly rent, string-encoded by the backend.
    #[serde(default)]
    pub rent_amount: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

/// Payload for creating a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUnit {
    pub property_id: String,

    pub unit_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_amount: Option<String>,
}

impl NewUnit {
    pub fn validate(&self) -> ApiResult<()> {
        require(&self.property_id, "propertyId")?;
        require(&self.unit_number, "unitNumber")
    }
}

/// A tenant record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,

    #[serde(default)]
    pub organization_id: Option<String>,

    pub first_name: String,

    pub last_name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub unit_id: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for creating a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTenant {
    pub first_name: String,

    pub last_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl NewTenant {
    pub fn validate(&self) -> ApiResult<()> {
        require(&self.first_name, "firstName")?;
        require(&self.last_name, "lastName")?;
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(ApiError::Validation {
                    field: "email".to_string(),
                    message: "must be a valid email address".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A lease binding a tenant to a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub id: String,

    pub tenant_id: String,

    pub unit_id: String,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default)]
    pub rent_amount: Option<String>,

    #[serde(default)]
    pub deposit_amount: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

/// Payload for creating a lease.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLease {
    pub tenant_id: String,

    pub unit_id: String,

    pub start_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_amount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<String>,
}

impl NewLease {
    pub fn validate(&self) -> ApiResult<()> {
        require(&self.tenant_id, "tenantId")?;
        require(&self.unit_id, "unitId")?;
        require(&self.start_date, "startDate")
    }
}

/// A recorded rent payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentPayment {
    pub id: String,

    pub tenant_id: String,

    #[serde(default)]
    pub unit_id: Option<String>,

    /// String-encoded amount (e.g. "500").
    pub amount: String,

    #[serde(default)]
    pub paid_date: Option<String>,

    #[serde(default)]
    pub payment_method: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub organization_id: Option<String>,
}

/// Payload for recording a rent payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRentPayment {
    pub tenant_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,

    pub amount: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl NewRentPayment {
    pub fn validate(&self) -> ApiResult<()> {
        require(&self.tenant_id, "tenantId")?;
        require(&self.amount, "amount")
    }
}

/// Partial update for a rent payment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentPaymentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A maintenance request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: String,

    #[serde(default)]
    pub tenant_id: Option<String>,

    #[serde(default)]
    pub unit_id: Option<String>,

    #[serde(default)]
    pub property_id: Option<String>,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for filing a maintenance request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceRequest {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl NewMaintenanceRequest {
    pub fn validate(&self) -> ApiResult<()> {
        require(&self.title, "title")
    }
}

/// Partial update for a maintenance request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// A stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,

    pub name: String,

    /// Backend-defined kind (e.g. "lease", "invoice").
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub organization_id: Option<String>,

    #[serde(default)]
    pub uploaded_at: Option<String>,
}

/// Payload for registering a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NewDocument {
    pub fn validate(&self) -> ApiResult<()> {
        require(&self.name, "name")
    }
}

/// A message between portal users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,

    pub sender_id: String,

    pub recipient_id: String,

    pub body: String,

    #[serde(default)]
    pub sent_at: Option<String>,

    #[serde(default)]
    pub read: bool,
}

/// Payload for sending a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub recipient_id: String,

    pub body: String,
}

impl NewMessage {
    pub fn validate(&self) -> ApiResult<()> {
        require(&self.recipient_id, "recipientId")?;
        require(&self.body, "body")
    }
}

/// A notification for the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,

    #[serde(default)]
    pub user_id: Option<String>,

    pub title: String,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub read: bool,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// A billing record (rent or fee charge).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    pub id: String,

    pub tenant_id: String,

    #[serde(default)]
    pub unit_id: Option<String>,

    /// String-encoded amount (e.g. "1000").
    pub amount: String,

    /// Billing period (e.g. "2025-07").
    #[serde(default)]
    pub billing_period: Option<String>,

    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    /// Backend-defined kind (e.g. "rent", "late_fee").
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub organization_id: Option<String>,
}

/// Payload for creating a billing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBillingRecord {
    pub tenant_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,

    pub amount: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl NewBillingRecord {
    pub fn validate(&self) -> ApiResult<()> {
        require(&self.tenant_id, "tenantId")?;
        require(&self.amount, "amount")
    }
}

/// Partial update for a billing record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecordUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Response from the billing generators (`generate-monthly`, `run-automatic`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRunSummary {
    /// Billing records created by the run.
    pub generated: u32,

    /// Existing records updated (only for automatic runs).
    #[serde(default)]
    pub updated: Option<u32>,
}

/// Response from `GET /api/outstanding-balance/{tenantId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingBalance {
    pub balance: f64,
}

/// Request for phase 1 of the payment handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntent {
    /// Charge amount in minor units (cents).
    pub amount: i64,

    pub description: String,
}

impl CreatePaymentIntent {
    pub fn validate(&self) -> ApiResult<()> {
        if self.amount <= 0 {
            return Err(ApiError::Validation {
                field: "amount".to_string(),
                message: "must be positive".to_string(),
            });
        }
        require(&self.description, "description")
    }
}

/// Phase-1 response: the client secret handed to the processor SDK.
///
/// Completing the charge (phase 2) happens in the processor's own SDK and is
/// not part of this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// The authenticated user's profile, also cached in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// "landlord" or "tenant".
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub organization_id: Option<String>,
}

/// Generic acknowledgement for delete-style mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    #[serde(default)]
    pub message: Option<String>,
}

fn require(value: &str, field: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_decodes_camel_case() {
        let json = serde_json::json!({
            "id": "t1",
            "firstName": "Jane",
            "lastName": "Doe",
            "unitId": "u1"
        });
        let tenant: Tenant = serde_json::from_value(json).unwrap();
        assert_eq!(tenant.first_name, "Jane");
        assert_eq!(tenant.unit_id, Some("u1".to_string()));
        assert!(tenant.email.is_none());
    }

    #[test]
    fn test_billing_record_type_field() {
        let json = serde_json::json!({
            "id": "b1",
            "tenantId": "t1",
            "amount": "1000",
            "billingPeriod": "2025-07",
            "type": "rent"
        });
        let record: BillingRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.kind, Some("rent".to_string()));
        assert_eq!(record.amount, "1000");
    }

    #[test]
    fn test_update_payload_skips_unset_fields() {
        let update = BillingRecordUpdate {
            amount: Some("1100".to_string()),
            status: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"amount": "1100"}));
    }

    #[test]
    fn test_payment_intent_validation() {
        let bad = CreatePaymentIntent {
            amount: 0,
            description: "rent".to_string(),
        };
        assert!(matches!(
            bad.validate(),
            Err(ApiError::Validation { ref field, .. }) if field == "amount"
        ));

        let good = CreatePaymentIntent {
            amount: 50_000,
            description: "August rent".to_string(),
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_new_tenant_email_validation() {
        let bad = NewTenant {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: Some("not-an-email".to_string()),
            phone: None,
            unit_id: None,
            organization_id: None,
        };
        assert!(matches!(
            bad.validate(),
            Err(ApiError::Validation { ref field, .. }) if field == "email"
        ));
    }

    #[test]
    fn test_payment_intent_decodes_client_secret() {
        let json = serde_json::json!({"clientSecret": "pi_123_secret_456"});
        let intent: PaymentIntent = serde_json::from_value(json).unwrap();
        assert_eq!(intent.client_secret, "pi_123_secret_456");
    }
}
