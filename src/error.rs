use thiserror::Error;

/// Longest slice of a response body carried inside an error message.
pub const ERROR_BODY_LIMIT: usize = 200;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unknown record kind: {0}")]
    UnknownRecordKind(String),

    #[error("Unknown assistant: {0}")]
    UnknownAssistant(String),

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("No auth token set")]
    MissingToken,

    #[error("Please fill in all profile fields: {}", .0.join(", "))]
    InvalidProfile(Vec<String>),

    #[error("Unauthorized - invalid token")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Cannot connect to backend: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Cut a response body down to [`ERROR_BODY_LIMIT`] characters.
pub fn truncate_body(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}
