//! Messaging endpoints.

use rentdesk_client::{ApiResult, FetchOutcome, QueryKey};

use crate::models::{Message, NewMessage};

use super::Portal;

const COLLECTION: &str = "/api/messages";

/// Operations on portal messages.
#[derive(Debug)]
pub struct MessagesApi<'a> {
    pub(crate) portal: &'a Portal,
}

impl MessagesApi<'_> {
    /// List the current user's messages.
    pub async fn list(&self) -> ApiResult<FetchOutcome<Vec<Message>>> {
        let key = QueryKey::path(COLLECTION);
        self.portal.client.query().fetch(&key).await
    }

    /// Send a message.
    pub async fn send(&self, payload: &NewMessage) -> ApiResult<Message> {
        payload.validate()?;
        let sent: Message = self.portal.client.post(COLLECTION, payload).await?;
        self.portal.client.query().invalidate(&QueryKey::path(COLLECTION));
        Ok(sent)
    }
}
