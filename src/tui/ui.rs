use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::{App, UiState};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ErrorView, LoadingView, StoryView, ThemeInput, TitleBar};

pub const FOOTER_TAGLINE: &str = "Powered by AI Storytellers";

/// Widest the theme form is allowed to grow.
const FORM_MAX_WIDTH: u16 = 90;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TitleBar::new(app.backend.describe(), &app.status_message).render(frame, title_area);

    match &app.ui {
        UiState::Initial => draw_initial(frame, main_area, tui),
        UiState::Loading(_) => LoadingView::new(spinner_frame).render(frame, main_area),
        UiState::Story(snapshot) => {
            let choice_height = tui
                .choice_list
                .required_height(main_area.width)
                .min(main_area.height / 2);
            let [story_area, choices_area] =
                Layout::vertical([Min(0), Length(choice_height)]).areas(main_area);
            StoryView::new(snapshot, app.chapter(), &mut tui.story_view).render(frame, story_area);
            tui.choice_list.render(frame, choices_area);
        }
        UiState::Error(message) => ErrorView::new(message).render(frame, main_area),
    }

    draw_footer(frame, footer_area, &app.ui);
}

fn draw_initial(frame: &mut Frame, area: Rect, tui: &mut TuiState) {
    let [column] = Layout::horizontal([Constraint::Max(FORM_MAX_WIDTH)])
        .flex(Flex::Center)
        .areas(area);
    let [form] = Layout::vertical([Constraint::Length(ThemeInput::HEIGHT)])
        .flex(Flex::Center)
        .areas(column);
    tui.theme_input.render(frame, form);
}

/// Key hints for the current screen.
pub fn key_hints(ui: &UiState) -> &'static str {
    match ui {
        UiState::Initial => "Enter: start · Esc: quit",
        UiState::Loading(_) => "Ctrl+C: quit",
        UiState::Story(_) => "1-9/↑↓: choose · PgUp/PgDn: scroll · r: Start New Adventure · q: quit",
        UiState::Error(_) => "Enter/r: Try Again · q: quit",
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, ui: &UiState) {
    let line = Line::from(vec![
        Span::styled(
            FOOTER_TAGLINE,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::raw(key_hints(ui)),
    ]);
    frame.render_widget(line, area);
}
