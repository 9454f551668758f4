//! Typed resource endpoints for the Rentdesk portal API.
//!
//! Wraps [`rentdesk_client`] with record schemas and per-collection
//! operations: properties, units, tenants, leases, rent payments,
//! maintenance requests, documents, messages, notifications, and billing
//! (including phase 1 of the payment-processor handshake).
//!
//! Reads return [`rentdesk_client::FetchOutcome`]: they are gated on the
//! session and cached. Mutations return plain results and invalidate the
//! collection keys they touch.
//!
//! # Quick Start
//!
//! ```no_run
//! use rentdesk_api::Portal;
//! use rentdesk_client::{ClientConfig, SessionStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let portal = Portal::new(ClientConfig::from_env())?;
//!
//! let store = SessionStore::new()?;
//! portal.bootstrap(&store).await;
//!
//! if let Some(tenants) = portal.tenants().list().await?.value() {
//!     for tenant in tenants {
//!         println!("{} {}", tenant.first_name, tenant.last_name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod endpoints;
pub mod models;

// Re-export main types
pub use endpoints::{
    BillingApi, DocumentsApi, LeasesApi, MaintenanceApi, MessagesApi, NotificationsApi, Portal,
    PropertiesApi, RentPaymentsApi, TenantsApi, UnitsApi,
};
pub use models::{
    BillingRecord, BillingRecordUpdate, BillingRunSummary, CreatePaymentIntent, Deleted, Document,
    Lease, MaintenanceRequest, MaintenanceUpdate, Message, NewBillingRecord, NewDocument, NewLease,
    NewMaintenanceRequest, NewMessage, NewProperty, NewRentPayment, NewTenant, NewUnit,
    Notification, OutstandingBalance, PaymentIntent, Property, RentPayment, RentPaymentUpdate,
    Tenant, Unit, UserProfile,
};
