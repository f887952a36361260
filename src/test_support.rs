//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use async_trait::async_trait;

use crate::backend::{
    BackendError, ContinueRequest, StartRequest, StoryBackend, StorySegment,
};

/// A backend for tests that never expect a real call to go out.
pub struct NoopBackend;

#[async_trait]
impl StoryBackend for NoopBackend {
    fn describe(&self) -> &str {
        "noop"
    }

    async fn start_story(&self, _request: &StartRequest) -> Result<StorySegment, BackendError> {
        Err(BackendError::Network("noop backend".to_string()))
    }

    async fn continue_story(
        &self,
        _request: &ContinueRequest,
    ) -> Result<StorySegment, BackendError> {
        Err(BackendError::Network("noop backend".to_string()))
    }
}

/// Creates a test App with a NoopBackend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopBackend))
}
