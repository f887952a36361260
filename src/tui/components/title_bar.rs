//! # TitleBar Component
//!
//! Top status bar: app name, backend location and the current status message.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.backend.describe(), &app.status_message);
//! title_bar.render(frame, title_area);
//! ```
//!
//! The title text depends on state:
//!
//! 1. **Status message**: `"My Adventure Tale (http://localhost:8000) | Chapter 2"`
//! 2. **Default**: `"My Adventure Tale (http://localhost:8000)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const APP_TITLE: &str = "My Adventure Tale";

pub struct TitleBar<'a> {
    /// Where stories come from (e.g., "http://localhost:8000")
    pub backend: &'a str,
    /// Status message (e.g., "Starting...", "Chapter 2")
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(backend: &'a str, status_message: &'a str) -> Self {
        Self {
            backend,
            status_message,
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                APP_TITLE,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({})", self.backend),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("http://localhost:8000", "Chapter 2");
        let text = render_text(&mut title_bar);

        assert!(text.contains(APP_TITLE));
        assert!(text.contains("http://localhost:8000"));
        assert!(text.contains("| Chapter 2"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("http://localhost:8000", "");
        let text = render_text(&mut title_bar);

        assert!(text.contains(APP_TITLE));
        assert!(!text.contains('|'));
    }
}
