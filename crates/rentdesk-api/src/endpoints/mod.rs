//! Typed endpoint wrappers over the portal client.
//!
//! Reads go through the auth-gated query layer (cached, retried); mutations
//! go through the plain request helpers (single-shot) and invalidate the
//! collection keys they touch.

use rentdesk_client::{ApiResult, ClientConfig, PortalClient, SessionStore};

mod billing;
mod documents;
mod leases;
mod maintenance;
mod messages;
mod notifications;
mod payments;
mod properties;
mod tenants;
mod units;

pub use billing::BillingApi;
pub use documents::DocumentsApi;
pub use leases::LeasesApi;
pub use maintenance::MaintenanceApi;
pub use messages::MessagesApi;
pub use notifications::NotificationsApi;
pub use payments::RentPaymentsApi;
pub use properties::PropertiesApi;
pub use tenants::TenantsApi;
pub use units::UnitsApi;

/// Entry point for the portal API surface.
#[derive(Debug, Clone)]
pub struct Portal {
    pub(crate) client: PortalClient,
}

impl Portal {
    /// Create a portal over a fresh client.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Ok(Self {
            client: PortalClient::new(config)?,
        })
    }

    /// Create a portal from environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Ok(Self {
            client: PortalClient::from_env()?,
        })
    }

    /// Wrap an existing client.
    pub fn with_client(client: PortalClient) -> Self {
        Self { client }
    }

    /// The underlying client (session, query layer, plain helpers).
    pub fn client(&self) -> &PortalClient {
        &self.client
    }

    /// Finish startup bootstrap from the session store.
    pub async fn bootstrap(&self, store: &SessionStore) {
        self.client.bootstrap(store).await;
    }

    pub fn properties(&self) -> PropertiesApi<'_> {
        PropertiesApi { portal: self }
    }

    pub fn units(&self) -> UnitsApi<'_> {
        UnitsApi { portal: self }
    }

    pub fn tenants(&self) -> TenantsApi<'_> {
        TenantsApi { portal: self }
    }

    pub fn leases(&self) -> LeasesApi<'_> {
        LeasesApi { portal: self }
    }

    pub fn rent_payments(&self) -> RentPaymentsApi<'_> {
        RentPaymentsApi { portal: self }
    }

    pub fn maintenance(&self) -> MaintenanceApi<'_> {
        MaintenanceApi { portal: self }
    }

    pub fn documents(&self) -> DocumentsApi<'_> {
        DocumentsApi { portal: self }
    }

    pub fn messages(&self) -> MessagesApi<'_> {
        MessagesApi { portal: self }
    }

    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi { portal: self }
    }

    pub fn billing(&self) -> BillingApi<'_> {
        BillingApi { portal: self }
    }
}
