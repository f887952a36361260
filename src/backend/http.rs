//! HTTP implementation of [`StoryBackend`] against the story service.
//!
//! Both endpoints take a JSON body and answer with the same segment shape, so
//! all the status and body handling lives in [`HttpBackend::post`].

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;

use super::service::{BackendError, StoryBackend};
use super::types::{ContinueRequest, Endpoint, StartRequest, StorySegment};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<StorySegment, BackendError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        info!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Story backend response status: {}", status);

        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !status.is_success() {
            let err = error_from_body(status.as_u16(), &text);
            warn!("Story backend error on {:?}: {}", endpoint, err);
            return Err(err);
        }

        let segment: StorySegment = serde_json::from_str(&text).map_err(|e| {
            warn!("Malformed story segment ({} bytes): {}", text.len(), e);
            BackendError::Parse(e.to_string())
        })?;

        info!(
            "Story segment received: {} bytes of text, {} choices, {} turns of history",
            segment.story_text.len(),
            segment.choices.len(),
            segment.updated_story_history.len()
        );
        Ok(segment)
    }
}

/// Builds the error for a non-2xx response from its raw body.
///
/// A JSON body yields [`BackendError::Api`] with the `detail` field (strings
/// verbatim, any other non-null value serialised). A non-JSON body yields
/// [`BackendError::ApiUnreadable`].
fn error_from_body(status: u16, body: &str) -> BackendError {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return BackendError::ApiUnreadable { status };
    };

    let detail = match value.get("detail") {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(serde_json::Value::String(_)) | Some(serde_json::Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    };

    BackendError::Api { status, detail }
}

#[async_trait]
impl StoryBackend for HttpBackend {
    fn describe(&self) -> &str {
        &self.base_url
    }

    async fn start_story(&self, request: &StartRequest) -> Result<StorySegment, BackendError> {
        self.post(Endpoint::Start, request).await
    }

    async fn continue_story(
        &self,
        request: &ContinueRequest,
    ) -> Result<StorySegment, BackendError> {
        self.post(Endpoint::Continue, request).await
    }
}
