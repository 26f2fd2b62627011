use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::app::payload::MessagePayload;
use crate::app::ports::ConversationBackend;
use crate::config::BackendConfig;
use crate::constants::{CLEAR_CONVERSATION_PATH, CONVERSATION_PATH, SEND_MESSAGE_PATH, SEND_MESSAGE_WITH_DATA_PATH};
use crate::conversation::{ConnectionStatus, Conversation, SendMessageResponse};
use crate::error::{truncate_body, ClientError, Result};
use crate::types::Assistant;

/// HTTP adapter for one assistant's conversation endpoints.
pub struct ReqwestBackend {
    client: Client,
    base_url: String,
    assistant: Assistant,
    auth_token: String,
    request_timeout: Duration,
    message_timeout: Duration,
    health_check_timeout: Duration,
}

impl ReqwestBackend {
    pub fn new(config: &BackendConfig, assistant: Assistant) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            assistant,
            auth_token: config.auth_token.trim().to_string(),
            request_timeout: config.request_timeout(),
            message_timeout: config.message_timeout(),
            health_check_timeout: config.health_check_timeout(),
        })
    }

    pub fn assistant(&self) -> Assistant {
        self.assistant
    }

    /// Full URL of `path` under this assistant's prefix.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.assistant.path_prefix(), path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !self.auth_token.is_empty() {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", self.auth_token))
                .map_err(|e| ClientError::Config(format!("invalid auth token: {e}")))?;
            headers.insert(AUTHORIZATION, bearer);
        }
        Ok(headers)
    }

    fn authorized(&self) -> Result<()> {
        if self.auth_token.is_empty() {
            return Err(ClientError::MissingToken);
        }
        Ok(())
    }

    /// Send `request` with auth headers; anything but 200 becomes an error.
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.headers(self.headers()?).send().await.map_err(map_transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Backend responded");

        if status == StatusCode::OK {
            return Ok(response);
        }
        let body = truncate_body(&response.text().await.unwrap_or_default());
        warn!(status = status.as_u16(), body = %body, "Backend request failed");
        Err(map_status(status, &body))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.dispatch(request).await?;
        response.json::<T>().await.map_err(map_transport_error)
    }
}

fn map_transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else if err.is_connect() {
        ClientError::Connection(err.to_string())
    } else {
        ClientError::Http(err)
    }
}

/// Error for a non-200 response.
pub fn map_status(status: StatusCode, body: &str) -> ClientError {
    match status {
        StatusCode::BAD_REQUEST => ClientError::BadRequest(truncate_body(body)),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::INTERNAL_SERVER_ERROR => ClientError::Server(truncate_body(body)),
        other => ClientError::Status {
            status: other.as_u16(),
            body: truncate_body(body),
        },
    }
}

fn trimmed_message(message: &str) -> Result<&str> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ClientError::EmptyMessage);
    }
    Ok(message)
}

#[async_trait]
impl ConversationBackend for ReqwestBackend {
    async fn fetch_conversation(&self) -> Result<Conversation> {
        self.authorized()?;
        let request = self
            .client
            .get(self.endpoint(CONVERSATION_PATH))
            .timeout(self.request_timeout);
        self.execute(request).await
    }

    async fn send_message(&self, message: &str) -> Result<SendMessageResponse> {
        self.authorized()?;
        let message = trimmed_message(message)?;
        let request = self
            .client
            .post(self.endpoint(SEND_MESSAGE_PATH))
            .json(&json!({ "message": message }))
            .timeout(self.message_timeout);
        self.execute(request).await
    }

    async fn send_message_with_data(&self, payload: &MessagePayload) -> Result<SendMessageResponse> {
        self.authorized()?;
        trimmed_message(payload.message())?;
        let request = self
            .client
            .post(self.endpoint(SEND_MESSAGE_WITH_DATA_PATH))
            .json(payload)
            .timeout(self.message_timeout);
        self.execute(request).await
    }

    async fn clear_conversation(&self) -> Result<()> {
        self.authorized()?;
        let request = self
            .client
            .post(self.endpoint(CLEAR_CONVERSATION_PATH))
            .json(&json!({}))
            .timeout(self.request_timeout);
        self.dispatch(request).await?;
        Ok(())
    }

    async fn check_connection(&self) -> ConnectionStatus {
        let headers = match self.headers() {
            Ok(headers) => headers,
            Err(e) => {
                warn!("Cannot build request headers: {}", e);
                return ConnectionStatus::Disconnected;
            }
        };
        let result = self
            .client
            .get(self.endpoint(CONVERSATION_PATH))
            .headers(headers)
            .timeout(self.health_check_timeout)
            .send()
            .await;

        match result {
            Ok(response) => match response.status() {
                StatusCode::OK | StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => ConnectionStatus::Connected,
                other => ConnectionStatus::Error(other.as_u16()),
            },
            Err(e) if e.is_timeout() => ConnectionStatus::Timeout,
            Err(e) => {
                warn!("Backend unreachable: {}", e);
                ConnectionStatus::Disconnected
            }
        }
    }
}
