use async_trait::async_trait;

use crate::app::payload::MessagePayload;
use crate::conversation::{ConnectionStatus, Conversation, SendMessageResponse};
use crate::error::Result;

/// Remote conversation store for one assistant.
#[async_trait]
pub trait ConversationBackend: Send + Sync {
    async fn fetch_conversation(&self) -> Result<Conversation>;

    /// Send a bare message; the backend uses whatever data it already holds.
    async fn send_message(&self, message: &str) -> Result<SendMessageResponse>;

    /// Send a message along with the caller's normalized tables and profile.
    async fn send_message_with_data(&self, payload: &MessagePayload) -> Result<SendMessageResponse>;

    async fn clear_conversation(&self) -> Result<()>;

    async fn check_connection(&self) -> ConnectionStatus;
}
