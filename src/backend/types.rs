use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn, as the generation backend names it.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Part {
    pub text: String,
}

/// One exchange unit in the running dialogue.
///
/// Turns are produced by the backend and never edited locally; the client only
/// ever stores and resends them.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct ConversationTurn {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl ConversationTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Body of `POST /api/story/start`.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct StartRequest {
    pub theme: String,
}

/// Body of `POST /api/story/continue`.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct ContinueRequest {
    pub story_history: Vec<ConversationTurn>,
    pub choice_text: String,
}

/// Successful response shared by both story endpoints.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct StorySegment {
    pub story_text: String,
    pub image_prompt: String,
    pub choices: Vec<String>,
    pub updated_story_history: Vec<ConversationTurn>,
}

/// Which backend operation a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Continue,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Start => "/api/story/start",
            Endpoint::Continue => "/api/story/continue",
        }
    }

    /// Message shown when the server fails without a readable error body.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Endpoint::Start => "Failed to start story. Server returned an error.",
            Endpoint::Continue => "Failed to continue story. Server returned an error.",
        }
    }
}

/// A request the controller asks the adapter to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryRequest {
    Start(StartRequest),
    Continue(ContinueRequest),
}

impl StoryRequest {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            StoryRequest::Start(_) => Endpoint::Start,
            StoryRequest::Continue(_) => Endpoint::Continue,
        }
    }
}
