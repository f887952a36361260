//! # Application State
//!
//! Core business state for the story client. No TUI types live here;
//! presentation state belongs to the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn StoryBackend>     // story service
//! ├── ui: UiState                        // Initial | Loading | Story | Error
//! ├── history: Vec<ConversationTurn>     // transcript, replaced wholesale
//! └── status_message: String             // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::backend::{ConversationTurn, Endpoint, Role, StoryBackend};

pub const WELCOME_STATUS: &str = "Welcome, adventurer!";

/// The latest story segment shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorySnapshot {
    pub story_text: String,
    pub image_prompt: String,
    pub choices: Vec<String>,
}

impl StorySnapshot {
    /// Story text split on newlines, in order, keeping blank lines as empty paragraphs.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.story_text.split('\n').collect()
    }
}

/// Which screen the application is on. Data lives with the state that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Initial,
    /// A request to the given endpoint is in flight.
    Loading(Endpoint),
    Story(StorySnapshot),
    Error(String),
}

pub struct App {
    pub backend: Arc<dyn StoryBackend>,
    pub ui: UiState,
    pub history: Vec<ConversationTurn>,
    pub status_message: String,
}

impl App {
    pub fn new(backend: Arc<dyn StoryBackend>) -> Self {
        Self {
            backend,
            ui: UiState::Initial,
            history: Vec::new(),
            status_message: String::from(WELCOME_STATUS),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.ui, UiState::Loading(_))
    }

    pub fn snapshot(&self) -> Option<&StorySnapshot> {
        match &self.ui {
            UiState::Story(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.ui {
            UiState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Number of story segments the model has produced in this session.
    pub fn chapter(&self) -> usize {
        self.history
            .iter()
            .filter(|turn| turn.role == Role::Model)
            .count()
    }
}
