//! Shapes returned by the conversation endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::constants::{MESSAGE_ROLE_ASSISTANT, MESSAGE_ROLE_USER};

/// Author of a message. The backend encodes roles as integers; the coach
/// UI historically used strings, so both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum MessageRole {
    #[default]
    User,
    Assistant,
    Unknown(String),
}

impl From<Value> for MessageRole {
    fn from(value: Value) -> Self {
        match &value {
            Value::Number(n) if n.as_i64() == Some(MESSAGE_ROLE_USER) => MessageRole::User,
            Value::Number(n) if n.as_i64() == Some(MESSAGE_ROLE_ASSISTANT) => MessageRole::Assistant,
            Value::String(s) if s == "user" => MessageRole::User,
            Value::String(s) if s == "assistant" => MessageRole::Assistant,
            Value::Null => MessageRole::User,
            Value::String(s) => MessageRole::Unknown(s.clone()),
            other => MessageRole::Unknown(other.to_string()),
        }
    }
}

impl From<MessageRole> for Value {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => Value::from(MESSAGE_ROLE_USER),
            MessageRole::Assistant => Value::from(MESSAGE_ROLE_ASSISTANT),
            MessageRole::Unknown(raw) => Value::String(raw),
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => f.write_str("user"),
            MessageRole::Assistant => f.write_str("assistant"),
            MessageRole::Unknown(raw) => write!(f, "unknown ({raw})"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub role: MessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl Message {
    /// `HH:MM:SS` of `created_at`, or the raw value when it is not RFC 3339.
    pub fn display_time(&self) -> String {
        let Some(raw) = self.created_at.as_deref() else {
            return String::new();
        };
        chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|_| raw.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conversation {
    pub uuid: Option<String>,
    pub messages: Vec<Message>,
}

/// Reply to a send: the stored user message and the assistant's answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendMessageResponse {
    pub conversation_uuid: Option<String>,
    pub user_message: Option<Message>,
    pub assistant_message: Option<Message>,
}

/// Result of probing the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Error(u16),
    Disconnected,
    Timeout,
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connected => f.write_str("Connected to backend"),
            ConnectionStatus::Error(status) => write!(f, "Backend returned {status}"),
            ConnectionStatus::Disconnected => f.write_str("Cannot connect to backend (is it running?)"),
            ConnectionStatus::Timeout => f.write_str("Backend connection timeout"),
        }
    }
}
