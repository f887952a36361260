//! # ChoiceList Component
//!
//! One row per choice the story offers. Activating a row emits
//! `ChoiceEvent::Choose` with that choice's literal text.
//!
//! Keys: Up/Down or Tab/Shift+Tab move the selection, Enter picks it,
//! `1`-`9` pick a row directly. Everything is inert while `disabled`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const HEADING: &str = "What do you do next?";

/// Borders (2)
const HORIZONTAL_OVERHEAD: u16 = 2;
const VERTICAL_OVERHEAD: u16 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceEvent {
    Choose(String),
}

#[derive(Default)]
pub struct ChoiceList {
    /// Current choices (Prop)
    choices: Vec<String>,
    /// Request outstanding (Prop)
    pub disabled: bool,
    /// Highlighted row (Internal State)
    pub selected: usize,
}

impl ChoiceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sync choices from the app. The selection resets only when they change.
    pub fn set_choices(&mut self, choices: &[String]) {
        if self.choices != choices {
            self.choices = choices.to_vec();
            self.selected = 0;
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    fn label(index: usize, choice: &str) -> String {
        format!("{}. {}", index + 1, choice)
    }

    /// Height needed to show every choice wrapped at `width`, including borders.
    pub fn required_height(&self, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD + 2) as usize;
        if content_width == 0 {
            return VERTICAL_OVERHEAD + self.choices.len() as u16;
        }
        let rows: usize = self
            .choices
            .iter()
            .enumerate()
            .map(|(i, c)| textwrap::wrap(&Self::label(i, c), content_width).len().max(1))
            .sum();
        rows as u16 + VERTICAL_OVERHEAD
    }

    fn choose(&self, index: usize) -> Option<ChoiceEvent> {
        self.choices
            .get(index)
            .map(|choice| ChoiceEvent::Choose(choice.clone()))
    }
}

impl Component for ChoiceList {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(HEADING)
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM));

        let lines: Vec<Line> = self
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let is_selected = i == self.selected;
                let marker = if is_selected { "▶ " } else { "  " };
                let style = if self.disabled {
                    Style::default().fg(Color::DarkGray)
                } else if is_selected {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(Self::label(i, choice), style),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

impl EventHandler for ChoiceList {
    type Event = ChoiceEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled || self.choices.is_empty() {
            return None;
        }
        let last = self.choices.len() - 1;
        match event {
            TuiEvent::CursorUp | TuiEvent::PrevChoice => {
                self.selected = if self.selected == 0 { last } else { self.selected - 1 };
                None
            }
            TuiEvent::CursorDown | TuiEvent::NextChoice => {
                self.selected = if self.selected >= last { 0 } else { self.selected + 1 };
                None
            }
            TuiEvent::Submit => self.choose(self.selected),
            TuiEvent::InputChar(c) => {
                let digit = c.to_digit(10)? as usize;
                if digit == 0 {
                    return None;
                }
                self.choose(digit - 1)
            }
            _ => None,
        }
    }
}
