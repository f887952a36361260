//! # Loading Component
//!
//! Shown while a story request is in flight. The spinner frame is a prop
//! derived from elapsed time by the event loop, which redraws at ~12fps while
//! loading.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const LOADING_MESSAGE: &str = "Thinking of a good story...";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingView {
    pub spinner_frame: usize,
}

impl LoadingView {
    pub fn new(spinner_frame: usize) -> Self {
        Self { spinner_frame }
    }

    fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }
}

impl Component for LoadingView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [center] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(area);

        let lines = vec![
            Line::from(Span::styled(
                self.spinner(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                LOADING_MESSAGE,
                Style::default().fg(Color::Yellow),
            )),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center);
    }
}
