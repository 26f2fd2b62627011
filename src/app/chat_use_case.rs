use tracing::{info, instrument};

use crate::app::payload::build_payload;
use crate::app::ports::ConversationBackend;
use crate::error::{ClientError, Result};
use crate::session::Session;
use crate::types::Assistant;

/// Use case binding a backend to the caller's session.
pub struct ChatService<'a, B: ConversationBackend> {
    backend: &'a B,
    session: &'a mut Session,
    window_days: usize,
}

impl<'a, B: ConversationBackend> ChatService<'a, B> {
    pub fn new(backend: &'a B, session: &'a mut Session, window_days: usize) -> Self {
        Self {
            backend,
            session,
            window_days,
        }
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    /// Replace the session's history with the backend's.
    pub async fn refresh(&mut self) -> Result<()> {
        let conversation = self.backend.fetch_conversation().await?;
        info!("Loaded {} message(s) from the {}", conversation.messages.len(), self.session.assistant);
        self.session.apply_conversation(conversation);
        Ok(())
    }

    /// Send `message` with the session's tables and profile attached.
    #[instrument(skip(self, message), fields(assistant = %self.session.assistant))]
    pub async fn send(&mut self, message: &str) -> Result<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ClientError::EmptyMessage);
        }
        if self.session.assistant == Assistant::Coach {
            self.session.profile.validate_for_coach()?;
        }

        let payload = build_payload(self.session, message, self.window_days);
        let response = self.backend.send_message_with_data(&payload).await?;
        self.session.record_exchange(&response);
        info!(
            input_tokens = self.session.total_input_tokens,
            output_tokens = self.session.total_output_tokens,
            "Exchange recorded"
        );
        Ok(())
    }

    /// Send `message` without attaching any data.
    pub async fn send_plain(&mut self, message: &str) -> Result<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ClientError::EmptyMessage);
        }
        let response = self.backend.send_message(message).await?;
        self.session.record_exchange(&response);
        Ok(())
    }

    /// Clear the remote conversation, then the local history.
    pub async fn clear(&mut self) -> Result<()> {
        self.backend.clear_conversation().await?;
        self.session.reset_conversation();
        info!("Conversation cleared");
        Ok(())
    }
}
