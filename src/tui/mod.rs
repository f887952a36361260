//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core `Action`s, and performs the
//! `Effect`s `update()` asks for (spawning backend requests on tokio).
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle** (form, story, error): sleeps up to 500ms and only redraws on
//!   events, terminal resize, or a finished request.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::backend::{HttpBackend, StoryBackend, StoryRequest};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, UiState};
use crate::tui::component::EventHandler;
use crate::tui::components::{ChoiceEvent, ChoiceList, StoryViewState, ThemeEvent, ThemeInput};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub theme_input: ThemeInput,
    pub choice_list: ChoiceList,
    pub story_view: StoryViewState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            theme_input: ThemeInput::new(),
            choice_list: ChoiceList::new(),
            story_view: StoryViewState::new(),
        }
    }

    /// Sync component props with the app state.
    pub fn sync(&mut self, app: &App) {
        let loading = app.is_loading();
        self.theme_input.disabled = loading;
        self.choice_list.disabled = loading;
        if let Some(snapshot) = app.snapshot() {
            self.choice_list.set_choices(&snapshot.choices);
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Translate a terminal event into a core action for the current screen.
///
/// Events that only affect presentation (typing, scrolling, moving the
/// selection) are applied to `tui` directly and produce no action.
pub fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    match &app.ui {
        UiState::Initial => {
            if matches!(event, TuiEvent::Escape) {
                return Some(Action::Quit);
            }
            match tui.theme_input.handle_event(event)? {
                ThemeEvent::Submit(theme) => Some(Action::StartStory(theme)),
                ThemeEvent::ContentChanged => None,
            }
        }
        // Nothing but Ctrl+C while a request is in flight
        UiState::Loading(_) => None,
        UiState::Story(_) => {
            if tui.story_view.handle_event(event) {
                return None;
            }
            match event {
                TuiEvent::InputChar('r') => Some(Action::Restart),
                TuiEvent::InputChar('q') | TuiEvent::Escape => Some(Action::Quit),
                _ => match tui.choice_list.handle_event(event)? {
                    ChoiceEvent::Choose(text) => Some(Action::ContinueStory(text)),
                },
            }
        }
        UiState::Error(_) => match event {
            TuiEvent::Submit | TuiEvent::InputChar('r') => Some(Action::Restart),
            TuiEvent::InputChar('q') | TuiEvent::Escape => Some(Action::Quit),
            _ => None,
        },
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn StoryBackend> = Arc::new(HttpBackend::new(config.base_url));
    let mut app = App::new(backend);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        tui.sync(&app);
        let animating = app.is_loading();

        if needs_redraw || animating {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            // Props can change mid-batch (e.g. Enter moved us to Loading)
            tui.sync(&app);
            if let Some(action) = route_event(&app, &mut tui, &event)
                && apply(&mut app, &mut tui, action, &tx) == Effect::Quit
            {
                break 'event_loop;
            }
        }

        // Handle finished backend requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if apply(&mut app, &mut tui, action, &tx) == Effect::Quit {
                break 'event_loop;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Run an action through the reducer and perform the resulting effect.
fn apply(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> Effect {
    debug!("Event loop applying: {:?}", action);
    let new_segment = matches!(action, Action::StoryReceived(_));
    let effect = update(app, action);
    if new_segment && matches!(app.ui, UiState::Story(_)) {
        tui.story_view.reset();
    }
    if let Effect::SpawnRequest(request) = &effect {
        spawn_request(app.backend.clone(), request.clone(), tx.clone());
    }
    effect
}

fn spawn_request(backend: Arc<dyn StoryBackend>, request: StoryRequest, tx: mpsc::Sender<Action>) {
    let endpoint = request.endpoint();
    info!("Spawning {:?} request against {}", endpoint, backend.describe());

    tokio::spawn(async move {
        let request_start = std::time::Instant::now();
        let outcome = backend.send(&request).await;
        debug!(
            "{:?} request finished in {}ms",
            endpoint,
            request_start.elapsed().as_millis()
        );
        if tx.send(Action::from_outcome(endpoint, outcome)).is_err() {
            warn!("Failed to deliver {:?} result: receiver dropped", endpoint);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Endpoint;
    use crate::core::state::StorySnapshot;
    use crate::test_support::test_app;

    fn story_app(choices: &[&str]) -> App {
        let mut app = test_app();
        app.ui = UiState::Story(StorySnapshot {
            story_text: "Once upon a time".to_string(),
            image_prompt: "A castle".to_string(),
            choices: choices.iter().map(|s| s.to_string()).collect(),
        });
        app
    }

    #[test]
    fn test_typing_then_enter_starts_story() {
        let app = test_app();
        let mut tui = TuiState::new();
        for c in "a brave puppy".chars() {
            assert_eq!(route_event(&app, &mut tui, &TuiEvent::InputChar(c)), None);
        }
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::StartStory("a brave puppy".to_string()))
        );
    }

    #[test]
    fn test_enter_on_blank_form_does_nothing() {
        let app = test_app();
        let mut tui = TuiState::new();
        route_event(&app, &mut tui, &TuiEvent::InputChar(' '));
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::Submit), None);
    }

    #[test]
    fn test_r_types_on_initial_screen() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::InputChar('r')), None);
        assert_eq!(tui.theme_input.buffer, "r");
    }

    #[test]
    fn test_loading_swallows_input() {
        let mut app = test_app();
        app.ui = UiState::Loading(Endpoint::Start);
        let mut tui = TuiState::new();
        tui.sync(&app);
        for event in [TuiEvent::Submit, TuiEvent::InputChar('1'), TuiEvent::Escape] {
            assert_eq!(route_event(&app, &mut tui, &event), None);
        }
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::ForceQuit),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_story_keys() {
        let app = story_app(&["Left", "Right"]);
        let mut tui = TuiState::new();
        tui.sync(&app);
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::InputChar('2')),
            Some(Action::ContinueStory("Right".to_string()))
        );
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::InputChar('r')),
            Some(Action::Restart)
        );
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::InputChar('q')),
            Some(Action::Quit)
        );
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::ScrollDown), None);
    }

    #[test]
    fn test_story_with_no_choices_can_still_restart() {
        let app = story_app(&[]);
        let mut tui = TuiState::new();
        tui.sync(&app);
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::Submit), None);
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::InputChar('r')),
            Some(Action::Restart)
        );
    }

    #[test]
    fn test_error_keys() {
        let mut app = test_app();
        app.ui = UiState::Error("boom".to_string());
        let mut tui = TuiState::new();
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::Restart)
        );
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Escape),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_sync_disables_inputs_while_loading() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        app.ui = UiState::Loading(Endpoint::Continue);
        tui.sync(&app);
        assert!(tui.theme_input.disabled);
        assert!(tui.choice_list.disabled);
    }
}
