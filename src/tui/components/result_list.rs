//! # ResultList Component
//!
//! Scrollable column of web result cards: title, URL, snippet.
//!
//! `ResultList` is a transient component (created each frame) that wraps
//! `&'a mut ResultListState` (persistent scroll state) and the results slice.
//! Card heights are predicted with `textwrap` before rendering so the
//! `ScrollView` canvas can be sized up front.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::client::WebResult;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::truncate_to_width;
use crate::tui::event::TuiEvent;

/// Borders (2) consumed horizontally by a card.
const CARD_HORIZONTAL_OVERHEAD: u16 = 2;
/// Borders (2) + title row + URL row.
const CARD_FIXED_ROWS: u16 = 4;

#[derive(Default)]
pub struct ResultListState {
    pub scroll_state: ScrollViewState,
    /// Total canvas height from the last render, for scroll clamping
    content_height: u16,
    viewport_height: u16,
}

impl ResultListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top; called when a new result set arrives.
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
    }
}

impl EventHandler for ResultListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown | TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::CursorHome => self.scroll_state.scroll_to_top(),
            TuiEvent::CursorEnd => self.scroll_state.scroll_to_bottom(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

/// A single result card.
struct ResultCard<'a> {
    result: &'a WebResult,
    snippet_lines: Vec<String>,
}

impl<'a> ResultCard<'a> {
    fn new(result: &'a WebResult, width: u16) -> Self {
        let inner = width.saturating_sub(CARD_HORIZONTAL_OVERHEAD) as usize;
        let snippet_lines = if inner == 0 || result.snippet.trim().is_empty() {
            Vec::new()
        } else {
            textwrap::wrap(result.snippet.trim(), textwrap::Options::new(inner).break_words(true))
                .into_iter()
                .map(|l| l.into_owned())
                .collect()
        };
        Self {
            result,
            snippet_lines,
        }
    }

    fn height(&self) -> u16 {
        CARD_FIXED_ROWS + self.snippet_lines.len() as u16
    }
}

impl Widget for ResultCard<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let inner = area.width.saturating_sub(CARD_HORIZONTAL_OVERHEAD) as usize;

        let mut lines = vec![
            Line::from(Span::styled(
                truncate_to_width(&self.result.title, inner),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Line::from(Span::styled(
                truncate_to_width(&self.result.url, inner),
                Style::default().fg(Color::Green),
            )),
        ];
        lines.extend(
            self.snippet_lines
                .into_iter()
                .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::Gray)))),
        );

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct ResultList<'a> {
    pub state: &'a mut ResultListState,
    pub results: &'a [WebResult],
    pub focused: bool,
}

impl<'a> ResultList<'a> {
    pub fn new(state: &'a mut ResultListState, results: &'a [WebResult], focused: bool) -> Self {
        Self {
            state,
            results,
            focused,
        }
    }
}

impl Component for ResultList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let outer = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(format!(" Web Results ({}) ", self.results.len()));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        if self.results.is_empty() {
            let empty = Paragraph::new("No search results found.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        let content_width = inner.width.saturating_sub(1); // -1 for scrollbar
        let cards: Vec<ResultCard> = self
            .results
            .iter()
            .map(|r| ResultCard::new(r, content_width))
            .collect();
        let total_height: u16 = cards.iter().map(ResultCard::height).sum();

        self.state.content_height = total_height;
        self.state.viewport_height = inner.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = 0u16;
        for card in cards {
            let height = card.height();
            scroll_view.render_widget(card, Rect::new(0, y, content_width, height));
            y += height;
        }

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_response;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &mut ResultListState, results: &[WebResult], w: u16, h: u16) -> String {
        let backend = TestBackend::new(w, h);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ResultList::new(state, results, false).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_results_message() {
        let mut state = ResultListState::new();
        let text = render(&mut state, &[], 40, 6);
        assert!(text.contains("No search results found."));
    }

    #[test]
    fn test_cards_in_input_order() {
        let results = sample_response(&[]).web_results;
        let mut state = ResultListState::new();
        let text = render(&mut state, &results, 120, 30);
        let first = text.find("What is Ownership?").unwrap();
        let second = text.find("Rust By Example").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_long_url_truncated_with_ellipsis() {
        let results = vec![WebResult {
            title: "t".to_string(),
            url: "https://example.com/a/very/long/path/that/will/not/fit".to_string(),
            snippet: String::new(),
        }];
        let mut state = ResultListState::new();
        let text = render(&mut state, &results, 30, 8);
        assert!(text.contains('…'));
        assert!(!text.contains("not/fit"));
    }

    #[test]
    fn test_card_height_counts_wrapped_snippet() {
        let result = WebResult {
            title: "t".to_string(),
            url: "u".to_string(),
            snippet: "one two three four five six".to_string(),
        };
        // inner width 8 → "one two" / "three" / "four" / "five six"
        let card = ResultCard::new(&result, 10);
        assert_eq!(card.height(), CARD_FIXED_ROWS + 4);
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let results = sample_response(&[]).web_results;
        let mut state = ResultListState::new();
        render(&mut state, &results, 120, 30);
        for _ in 0..50 {
            state.handle_event(&TuiEvent::ScrollDown);
        }
        assert_eq!(state.scroll_state.offset().y, 0, "content fits; nothing to scroll");
    }

    #[test]
    fn test_end_jumps_to_last_card() {
        let results = sample_response(&[]).web_results;
        let mut state = ResultListState::new();
        render(&mut state, &results, 40, 8);
        let max_y = state.content_height.saturating_sub(state.viewport_height);
        assert!(max_y > 0);

        state.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(state.scroll_state.offset().y, max_y);

        state.handle_event(&TuiEvent::CursorHome);
        assert_eq!(state.scroll_state.offset().y, 0);
    }
}
