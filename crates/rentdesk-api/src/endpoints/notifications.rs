//! Notification endpoints.

use rentdesk_client::{ApiResult, FetchOutcome, QueryKey};

use crate::models::Notification;

use super::Portal;

const COLLECTION: &str = "/api/notifications";

/// Operations on notifications.
#[derive(Debug)]
pub struct NotificationsApi<'a> {
    pub(crate) portal: &'a Portal,
}

impl NotificationsApi<'_> {
    /// List the current user's notifications.
    pub async fn list(&self) -> ApiResult<FetchOutcome<Vec<Notification>>> {
        let key = QueryKey::path(COLLECTION);
        self.portal.client.query().fetch(&key).await
    }

    /// Mark one notification as read.
    pub async fn mark_read(&self, id: &str) -> ApiResult<Notification> {
        let path = format!("{}/{}/read", COLLECTION, id);
        let updated: Notification = self
            .portal
            .client
            .post(&path, &serde_json::json!({}))
            .await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        Ok(updated)
    }
}
