//! # SearchBar Component
//!
//! Single-line query input.
//!
//! ## Responsibilities
//!
//! - Capture text input and editing (backspace, delete, cursor movement, paste)
//! - Emit `Submit` on Enter, leaving the text in place so the query stays visible
//! - Ignore all input while a search is in flight (`disabled` prop)
//! - Keep the cursor on screen by scrolling horizontally
//!
//! Cursor position is a byte offset into `buffer`; on-screen columns come from
//! `unicode-width` so wide characters (CJK, emoji) place the cursor correctly.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Search anything...";
/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Offset from area edge to content (border + padding)
const CONTENT_OFFSET: u16 = 2;

/// High-level events emitted by the SearchBar
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// User pressed Enter; carries the raw (untrimmed) text
    Submit(String),
    ContentChanged,
}

/// Query input.
///
/// # Props
///
/// - `disabled`: a search is running; input is ignored and the bar is dimmed
/// - `focused`: draws the focus border and places the terminal cursor
pub struct SearchBar {
    pub buffer: String,
    pub disabled: bool,
    pub focused: bool,
    /// Byte offset of the cursor in `buffer`
    cursor: usize,
    /// Display columns scrolled off the left edge
    scroll: u16,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            focused: true,
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor within the whole buffer.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }

    /// Adjust horizontal scroll so the cursor column lies inside `inner_width`.
    fn update_scroll(&mut self, inner_width: u16) {
        if inner_width == 0 {
            self.scroll = 0;
            return;
        }
        let col = self.cursor_column();
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + inner_width {
            self.scroll = col + 1 - inner_width;
        }
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        self.update_scroll(inner_width);

        let border_color = if self.focused && !self.disabled {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(" Search ")
            .padding(ratatui::widgets::Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            let style = if self.disabled {
                Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
            } else {
                Style::default().fg(Color::White)
            };
            Paragraph::new(Span::styled(self.buffer.as_str(), style)).scroll((0, self.scroll))
        };

        frame.render_widget(paragraph.block(block), area);

        if self.focused && !self.disabled && area.height >= 3 {
            let x = area.x + CONTENT_OFFSET + self.cursor_column().saturating_sub(self.scroll);
            let max_x = area.x + area.width.saturating_sub(CONTENT_OFFSET + 1);
            frame.set_cursor_position((x.min(max_x), area.y + 1));
        }
    }
}

impl EventHandler for SearchBar {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line input: pasted newlines become spaces
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&flat);
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                SearchEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                SearchEvent::ContentChanged
            }),
            TuiEvent::Submit => Some(SearchEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

/// Byte offset of the character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
