//! # ErrorView Component
//!
//! Shown after a failed request: a fixed headline, the message from the
//! controller, and how to try again.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::tui::component::Component;

pub const HEADLINE: &str = "Oh no, something went wrong!";
pub const RETRY_HINT: &str = "Enter: Try Again";

pub struct ErrorView<'a> {
    pub message: &'a str,
}

impl<'a> ErrorView<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Component for ErrorView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [column] = Layout::horizontal([Constraint::Max(70)])
            .flex(Flex::Center)
            .areas(area);

        // Borders (2) + headline, blank, message rows, blank, hint
        let inner_width = column.width.saturating_sub(4).max(1) as usize;
        let message_rows = u16::try_from(textwrap::wrap(self.message, inner_width).len())
            .unwrap_or(u16::MAX)
            .max(1);
        let [boxed] = Layout::vertical([Constraint::Length(message_rows.saturating_add(6))])
            .flex(Flex::Center)
            .areas(column);

        let mut lines = vec![
            Line::from(Span::styled(
                HEADLINE,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        // Server details may span several lines
        lines.extend(self.message.lines().map(Line::from));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            RETRY_HINT,
            Style::default().fg(Color::Yellow),
        )));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .padding(Padding::horizontal(1))
                    .title("ERROR")
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, boxed);
    }
}
