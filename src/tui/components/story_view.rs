//! # StoryView Component
//!
//! Renders the current story segment: the story text as one block per line
//! (blank lines included, order preserved) in a scrollable pane, and the
//! image description in its own box underneath.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `StoryViewState` lives in `TuiState` (scroll position survives frames)
//! - `StoryView` is created each frame with borrowed state and props

use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::StorySnapshot;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

pub const IMAGE_TITLE: &str = "Let's Imagine!";

/// Blank rows between consecutive story blocks.
const BLOCK_GAP: u16 = 1;
/// Rows moved per mouse wheel tick.
const WHEEL_STEP: u16 = 3;

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Lines a paragraph is drawn as at `width`. Empty paragraphs still take a row.
///
/// Blocks are drawn from these lines directly, so the reserved height and the
/// drawn height always agree.
fn wrapped_lines(text: &str, width: u16) -> Vec<Cow<'_, str>> {
    if width == 0 || text.is_empty() {
        return vec![Cow::Borrowed("")];
    }
    let lines = textwrap::wrap(text, wrap_options(width));
    if lines.is_empty() {
        vec![Cow::Borrowed("")]
    } else {
        lines
    }
}

fn wrapped_rows(text: &str, width: u16) -> u16 {
    u16::try_from(wrapped_lines(text, width).len()).unwrap_or(u16::MAX)
}

/// Vertical placement `(y, height)` of each story block inside the scroll content.
pub fn block_layout(paragraphs: &[&str], width: u16) -> Vec<(u16, u16)> {
    let mut y = 0u16;
    paragraphs
        .iter()
        .map(|p| {
            let height = wrapped_rows(p, width);
            let placed = (y, height);
            y = y.saturating_add(height.saturating_add(BLOCK_GAP));
            placed
        })
        .collect()
}

#[derive(Default)]
pub struct StoryViewState {
    pub scroll_state: ScrollViewState,
    /// Total content height from the last render (for clamping)
    content_height: u16,
    /// Viewport height from the last render
    viewport_height: u16,
}

impl StoryViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump back to the top, e.g. when a new segment arrives.
    pub fn reset(&mut self) {
        self.scroll_state.scroll_to_top();
    }

    /// Handles scroll events. Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::ScrollUp => {
                for _ in 0..WHEEL_STEP {
                    self.scroll_state.scroll_up();
                }
            }
            TuiEvent::ScrollDown => {
                for _ in 0..WHEEL_STEP {
                    self.scroll_state.scroll_down();
                }
            }
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return false,
        }
        self.clamp_scroll();
        true
    }

    /// Keep the offset within the content so scrolling down past the end is undone.
    fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

pub struct StoryView<'a> {
    pub snapshot: &'a StorySnapshot,
    pub chapter: usize,
    pub state: &'a mut StoryViewState,
}

impl<'a> StoryView<'a> {
    pub fn new(snapshot: &'a StorySnapshot, chapter: usize, state: &'a mut StoryViewState) -> Self {
        Self {
            snapshot,
            chapter,
            state,
        }
    }

    fn render_story(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title(format!("Chapter {}", self.chapter))
            .border_style(Style::default().fg(Color::Green).add_modifier(Modifier::DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column is reserved for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let paragraphs = self.snapshot.paragraphs();
        let layout = block_layout(&paragraphs, content_width);
        let content_height = layout
            .last()
            .map(|&(y, h)| y.saturating_add(h))
            .unwrap_or(0);

        self.state.content_height = content_height;
        self.state.viewport_height = inner.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (text, &(y, height)) in paragraphs.iter().zip(layout.iter()) {
            let lines: Vec<Line> = wrapped_lines(text, content_width)
                .into_iter()
                .map(|line| Line::from(line.into_owned()))
                .collect();
            let paragraph = Paragraph::new(lines);
            scroll_view.render_widget(paragraph, Rect::new(0, y, content_width, height));
        }

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }

    fn image_height(&self, width: u16, max: u16) -> u16 {
        let inner_width = width.saturating_sub(4);
        wrapped_rows(&self.snapshot.image_prompt, inner_width)
            .saturating_add(2)
            .min(max)
    }
}

impl Component for StoryView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let image_height = self.image_height(area.width, area.height / 2);
        let [story_area, image_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(image_height)]).areas(area);

        self.render_story(frame, story_area);

        let image = Paragraph::new(self.snapshot.image_prompt.as_str())
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .padding(Padding::horizontal(1))
                    .title(IMAGE_TITLE)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .style(Style::default().add_modifier(Modifier::ITALIC))
            .wrap(Wrap { trim: true });
        frame.render_widget(image, image_area);
    }
}
