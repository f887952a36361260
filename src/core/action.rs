//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! User submits a theme? That's `Action::StartStory(theme)`.
//! Backend responds? That's `Action::StoryReceived(segment)`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an `Effect` describing the I/O the adapter must perform. No side
//! effects happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Transitions:
//!
//! ```text
//! Initial --StartStory-->    Loading(Start)
//! Story   --ContinueStory--> Loading(Continue)
//! Loading --StoryReceived--> Story
//! Loading --StoryFailed-->   Error
//! Story   --Restart-->       Initial
//! Error   --Restart-->       Initial
//! ```
//!
//! Anything else is logged and ignored, so at most one request is ever in flight.

use log::{debug, info, warn};

use crate::backend::{
    BackendError, ContinueRequest, Endpoint, StartRequest, StoryRequest, StorySegment,
};
use crate::core::state::{App, StorySnapshot, UiState, WELCOME_STATUS};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StartStory(String),
    ContinueStory(String),
    StoryReceived(StorySegment),
    StoryFailed(String),
    Restart,
    Quit,
}

impl Action {
    /// Maps a finished backend call onto the action that reports it.
    pub fn from_outcome(endpoint: Endpoint, outcome: Result<StorySegment, BackendError>) -> Self {
        match outcome {
            Ok(segment) => Action::StoryReceived(segment),
            Err(e) => {
                warn!("Story request to {:?} failed: {}", endpoint, e);
                Action::StoryFailed(e.user_message(endpoint))
            }
        }
    }
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnRequest(StoryRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::StartStory(theme) => {
            if app.ui != UiState::Initial {
                warn!("Ignoring StartStory outside the initial screen");
                return Effect::None;
            }
            let theme = theme.trim();
            if theme.is_empty() {
                debug!("Ignoring StartStory with an empty theme");
                return Effect::None;
            }
            info!("Starting story with theme {:?}", theme);
            app.ui = UiState::Loading(Endpoint::Start);
            app.status_message = String::from("Starting...");
            Effect::SpawnRequest(StoryRequest::Start(StartRequest {
                theme: theme.to_string(),
            }))
        }
        Action::ContinueStory(choice_text) => {
            if !matches!(app.ui, UiState::Story(_)) {
                warn!("Ignoring ContinueStory outside the story screen");
                return Effect::None;
            }
            info!(
                "Continuing story with {:?} ({} turns of history)",
                choice_text,
                app.history.len()
            );
            app.ui = UiState::Loading(Endpoint::Continue);
            app.status_message = String::from("Continuing...");
            Effect::SpawnRequest(StoryRequest::Continue(ContinueRequest {
                story_history: app.history.clone(),
                choice_text,
            }))
        }
        Action::StoryReceived(segment) => {
            if !app.is_loading() {
                warn!("Dropping story segment received while not loading");
                return Effect::None;
            }
            let StorySegment {
                story_text,
                image_prompt,
                choices,
                updated_story_history,
            } = segment;
            app.history = updated_story_history;
            app.ui = UiState::Story(StorySnapshot {
                story_text,
                image_prompt,
                choices,
            });
            app.status_message = format!("Chapter {}", app.chapter());
            debug!("Entered story state ({} turns)", app.history.len());
            Effect::None
        }
        Action::StoryFailed(message) => {
            if !app.is_loading() {
                warn!("Dropping failure received while not loading: {}", message);
                return Effect::None;
            }
            app.ui = UiState::Error(message);
            app.status_message = String::from("Something went wrong");
            Effect::None
        }
        Action::Restart => {
            if app.is_loading() {
                warn!("Ignoring Restart while a request is in flight");
                return Effect::None;
            }
            info!("Restarting");
            app.ui = UiState::Initial;
            app.history.clear();
            app.status_message = String::from(WELCOME_STATUS);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
