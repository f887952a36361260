//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props and are created each frame:
//! - `TitleBar`: App name, backend location, status
//! - `LoadingView`: Spinner while a request is in flight
//! - `ErrorView`: Failure message with retry hint
//! - `StoryView`: Story text blocks and image description (borrows `StoryViewState`)
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state in `TuiState` and emit events:
//! - `ThemeInput`: Theme form on the initial screen
//! - `ChoiceList`: Next actions on the story screen
//!
//! Components receive external data as props rather than reading `App`
//! directly, which keeps their dependencies explicit and makes them testable
//! against a `TestBackend`.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── theme_input.rs   (Theme form)
//! ├── choice_list.rs   (Choice rows)
//! ├── story_view.rs    (Scrollable story + image prompt)
//! ├── loading.rs       (Spinner)
//! └── error_view.rs    (Failure screen)
//! ```

pub mod choice_list;
pub mod error_view;
pub mod loading;
pub mod story_view;
pub mod theme_input;
pub mod title_bar;

pub use choice_list::{ChoiceEvent, ChoiceList};
pub use error_view::ErrorView;
pub use loading::LoadingView;
pub use story_view::{StoryView, StoryViewState};
pub use theme_input::{ThemeEvent, ThemeInput};
pub use title_bar::TitleBar;
