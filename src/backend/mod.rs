pub mod http;
pub mod service;
pub mod types;

pub use http::{DEFAULT_BASE_URL, HttpBackend};
pub use service::{BackendError, StoryBackend};
pub use types::{
    ContinueRequest, ConversationTurn, Endpoint, Part, Role, StartRequest, StoryRequest,
    StorySegment,
};
