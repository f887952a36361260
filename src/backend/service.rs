use std::fmt;

use async_trait::async_trait;

use super::types::{ContinueRequest, Endpoint, StartRequest, StoryRequest, StorySegment};

const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Errors that can occur while talking to the story backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Request never produced a response (DNS, connection refused, reset).
    Network(String),
    /// Non-2xx status with a JSON body. `detail` is the server's message, if any.
    Api { status: u16, detail: Option<String> },
    /// Non-2xx status whose body was not JSON.
    ApiUnreadable { status: u16 },
    /// 2xx status but the body did not match the expected segment shape.
    Parse(String),
}

impl BackendError {
    /// Human-readable message for the error screen.
    ///
    /// Prefers the server's `detail`, then a status or endpoint fallback, then
    /// the underlying transport or parse description.
    pub fn user_message(&self, endpoint: Endpoint) -> String {
        match self {
            BackendError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            BackendError::Api {
                status,
                detail: None,
            } => format!("HTTP error! status: {status}"),
            BackendError::ApiUnreadable { .. } => endpoint.fallback_message().to_string(),
            BackendError::Network(msg) | BackendError::Parse(msg) => {
                if msg.trim().is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    msg.clone()
                }
            }
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api {
                status,
                detail: Some(detail),
            } => write!(f, "API error (HTTP {status}): {detail}"),
            BackendError::Api {
                status,
                detail: None,
            } => write!(f, "API error (HTTP {status})"),
            BackendError::ApiUnreadable { status } => {
                write!(f, "API error (HTTP {status}): unreadable body")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait StoryBackend: Send + Sync {
    /// Human-readable location of the backend, for the title bar and logs.
    fn describe(&self) -> &str;

    async fn start_story(&self, request: &StartRequest) -> Result<StorySegment, BackendError>;

    async fn continue_story(
        &self,
        request: &ContinueRequest,
    ) -> Result<StorySegment, BackendError>;

    /// Dispatches a controller request to the matching endpoint.
    async fn send(&self, request: &StoryRequest) -> Result<StorySegment, BackendError> {
        match request {
            StoryRequest::Start(req) => self.start_story(req).await,
            StoryRequest::Continue(req) => self.continue_story(req).await,
        }
    }
}
