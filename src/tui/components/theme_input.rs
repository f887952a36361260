//! # ThemeInput Component
//!
//! The story theme form shown on the initial screen.
//!
//! ## Responsibilities
//!
//! - Capture a single line of text (typing, paste, backspace, delete, cursor movement)
//! - Emit `ThemeEvent::Submit` with the trimmed theme on Enter
//! - Stay inert when the trimmed buffer is empty or a request is outstanding
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `disabled` is a prop synced from
//! the application state every frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const PROMPT: &str = "What kind of adventure do you want?";
pub const PLACEHOLDER: &str = "e.g., a friendly dragon, a magic forest";
pub const EXAMPLES: &str =
    "Examples: a brave puppy, a talking squirrel, a journey to the stars, a hidden treasure";

/// Borders (2) + horizontal padding (2)
const HORIZONTAL_OVERHEAD: u16 = 4;

/// High-level events emitted by the ThemeInput
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeEvent {
    /// User submitted a non-empty theme (already trimmed)
    Submit(String),
    ContentChanged,
}

pub struct ThemeInput {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Request outstanding (Prop)
    pub disabled: bool,
    /// Cursor position as byte offset in buffer
    cursor: usize,
}

impl Default for ThemeInput {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeInput {
    /// Rows needed: input box (3), submit hint, examples line.
    pub const HEIGHT: u16 = 5;

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            cursor: 0,
        }
    }

    /// Whether Enter would currently submit.
    pub fn can_submit(&self) -> bool {
        !self.disabled && !self.buffer.trim().is_empty()
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Horizontal scroll so the cursor stays inside the box.
    fn scroll_offset(&self, inner_width: u16) -> u16 {
        let cursor_col = self.buffer[..self.cursor].width() as u16;
        cursor_col.saturating_sub(inner_width.saturating_sub(1))
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl Component for ThemeInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [box_area, hint_area, examples_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let text_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title(PROMPT)
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let inner_width = box_area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let offset = self.scroll_offset(inner_width);

        let content = if self.buffer.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(self.buffer.as_str(), text_style))
        };

        let input = Paragraph::new(content).block(block).scroll((0, offset));
        frame.render_widget(input, box_area);

        let hint_label = if self.disabled {
            "Starting..."
        } else {
            "Enter: Start Adventure!"
        };
        let hint_style = if self.can_submit() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(Paragraph::new(Span::styled(hint_label, hint_style)), hint_area);

        frame.render_widget(
            Paragraph::new(Span::styled(EXAMPLES, Style::default().fg(Color::DarkGray))),
            examples_area,
        );

        if !self.disabled && box_area.width > HORIZONTAL_OVERHEAD {
            let cursor_col = self.buffer[..self.cursor].width() as u16 - offset;
            frame.set_cursor_position((box_area.x + 2 + cursor_col, box_area.y + 1));
        }
    }
}

impl EventHandler for ThemeInput {
    type Event = ThemeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buf));
                Some(ThemeEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line field: newlines become spaces
                let flattened: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&flattened);
                Some(ThemeEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                ThemeEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                ThemeEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                ThemeEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                ThemeEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                ThemeEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                ThemeEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                let theme = self.buffer.trim();
                if theme.is_empty() {
                    return None;
                }
                let theme = theme.to_string();
                self.buffer.clear();
                self.cursor = 0;
                Some(ThemeEvent::Submit(theme))
            }
            _ => None,
        }
    }
}
