use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use crate::conversation::{Conversation, Message, SendMessageResponse};
use crate::error::Result;
use crate::profile::UserProfile;
use crate::samples;
use crate::types::{Assistant, RawTabularRow, RecordKind};

/// Everything the client remembers between commands: the conversation as
/// last seen, the profile, and the uploaded tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub assistant: Assistant,
    #[serde(default)]
    pub conversation_uuid: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub health_rows: Vec<RawTabularRow>,
    #[serde(default)]
    pub dietary_rows: Vec<RawTabularRow>,
    #[serde(default)]
    pub workout_rows: Vec<RawTabularRow>,
    #[serde(default)]
    pub available_workouts: Vec<Value>,
    #[serde(default)]
    pub total_input_tokens: u64,
    #[serde(default)]
    pub total_output_tokens: u64,
}

impl Session {
    pub fn new(assistant: Assistant) -> Self {
        let available_workouts = match assistant {
            Assistant::Coach => samples::available_workouts(),
            Assistant::Nutritionist => Vec::new(),
        };
        Self {
            id: Uuid::new_v4(),
            assistant,
            conversation_uuid: None,
            messages: Vec::new(),
            profile: UserProfile::default(),
            health_rows: Vec::new(),
            dietary_rows: Vec::new(),
            workout_rows: Vec::new(),
            available_workouts,
            total_input_tokens: 0,
            total_output_tokens: 0,
        }
    }

    /// Load the session stored at `path`, or start a fresh one when the
    /// file is missing or belongs to the other assistant.
    pub fn load(path: &Path, assistant: Assistant) -> Result<Self> {
        if !path.exists() {
            debug!("No session at {}, starting fresh", path.display());
            return Ok(Self::new(assistant));
        }
        let content = fs::read_to_string(path)?;
        let session: Session = serde_json::from_str(&content)?;
        if session.assistant != assistant {
            info!(
                "Session at {} belongs to the {}, starting a fresh {} session",
                path.display(),
                session.assistant,
                assistant
            );
            return Ok(Self::new(assistant));
        }
        Ok(session)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(session = %self.id, "Saved session to {}", path.display());
        Ok(())
    }

    pub fn rows(&self, kind: RecordKind) -> &[RawTabularRow] {
        match kind {
            RecordKind::Health => &self.health_rows,
            RecordKind::Dietary => &self.dietary_rows,
            RecordKind::Workout => &self.workout_rows,
        }
    }

    /// Replace the uploaded table for `kind`.
    pub fn set_rows(&mut self, kind: RecordKind, rows: Vec<RawTabularRow>) {
        match kind {
            RecordKind::Health => self.health_rows = rows,
            RecordKind::Dietary => self.dietary_rows = rows,
            RecordKind::Workout => self.workout_rows = rows,
        }
    }

    /// Fill the tables with the built-in examples for this assistant.
    pub fn load_samples(&mut self) {
        self.health_rows = samples::health_rows_for(self.assistant);
        match self.assistant {
            Assistant::Nutritionist => self.dietary_rows = samples::dietary_rows(),
            Assistant::Coach => {
                self.workout_rows = samples::workout_rows();
                self.available_workouts = samples::available_workouts();
            }
        }
    }

    /// Replace local history with the backend's copy.
    pub fn apply_conversation(&mut self, conversation: Conversation) {
        if conversation.uuid.is_some() {
            self.conversation_uuid = conversation.uuid;
        }
        self.messages = conversation.messages;
    }

    /// Append both sides of a completed exchange and count its tokens.
    pub fn record_exchange(&mut self, response: &SendMessageResponse) {
        if response.conversation_uuid.is_some() {
            self.conversation_uuid = response.conversation_uuid.clone();
        }
        for message in [&response.user_message, &response.assistant_message].into_iter().flatten() {
            self.total_input_tokens += message.input_tokens;
            self.total_output_tokens += message.output_tokens;
            self.messages.push(message.clone());
        }
    }

    /// Drop chat history and token totals; profile and tables stay.
    pub fn reset_conversation(&mut self) {
        self.messages.clear();
        self.total_input_tokens = 0;
        self.total_output_tokens = 0;
    }
}
