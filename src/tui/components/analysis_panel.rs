//! # AnalysisPanel Component
//!
//! One tab per analysed model; the active tab's text is rendered as markdown
//! while the typewriter reveals it.
//!
//! ## Responsibilities
//!
//! - Tabs labelled by model display name, active tab highlighted
//! - Markdown body of the *visible* prefix, with a `▌` cursor while revealing
//! - Pause/play indicator in the border
//! - Scrolling that follows the reveal until the user scrolls up
//! - Translating keys into `AnalysisEvent`s (tab switch, reveal controls, copy)

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Paragraph, Tabs, Wrap};

use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

pub const TYPING_CURSOR: &str = "▌";

/// High-level events emitted by the analysis panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    NextTab,
    PrevTab,
    ToggleReveal,
    SkipReveal,
    RestartReveal,
    /// Copy the n-th (1-based) code block of the visible text
    CopyCode(usize),
}

/// Scroll state for the analysis body. Persisted in `TuiState`.
pub struct AnalysisPanelState {
    pub scroll: u16,
    /// Keep the newest revealed line in view
    pub follow: bool,
    content_height: u16,
    viewport_height: u16,
}

impl Default for AnalysisPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisPanelState {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            follow: true,
            content_height: 0,
            viewport_height: 0,
        }
    }

    /// Top of the text, following again. Called whenever a reveal (re)starts.
    pub fn reset(&mut self) {
        self.scroll = 0;
        self.follow = true;
    }

    fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn scroll_up(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_sub(rows);
        self.follow = false;
    }

    fn scroll_down(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll());
        if self.scroll >= self.max_scroll() {
            self.follow = true;
        }
    }
}

impl EventHandler for AnalysisPanelState {
    type Event = AnalysisEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorRight => Some(AnalysisEvent::NextTab),
            TuiEvent::CursorLeft => Some(AnalysisEvent::PrevTab),
            TuiEvent::InputChar('p' | ' ') => Some(AnalysisEvent::ToggleReveal),
            TuiEvent::InputChar('s') => Some(AnalysisEvent::SkipReveal),
            TuiEvent::InputChar('r') => Some(AnalysisEvent::RestartReveal),
            TuiEvent::InputChar(c @ '1'..='9') => {
                c.to_digit(10).map(|n| AnalysisEvent::CopyCode(n as usize))
            }
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_up(1);
                None
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_down(1);
                None
            }
            TuiEvent::PageUp => {
                self.scroll_up(self.viewport_height.max(1));
                None
            }
            TuiEvent::PageDown => {
                self.scroll_down(self.viewport_height.max(1));
                None
            }
            TuiEvent::CursorHome => {
                self.scroll_up(u16::MAX);
                None
            }
            TuiEvent::CursorEnd => {
                self.scroll_down(u16::MAX);
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct AnalysisPanel<'a> {
    pub state: &'a mut AnalysisPanelState,
    pub app: &'a App,
    /// Code currently showing the "copied" marker
    pub copied: Option<&'a str>,
    pub focused: bool,
}

impl<'a> AnalysisPanel<'a> {
    pub fn new(
        state: &'a mut AnalysisPanelState,
        app: &'a App,
        copied: Option<&'a str>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            app,
            copied,
            focused,
        }
    }
}

/// Markdown of the visible text, plus the cursor while revealing.
pub fn body_text(visible: &str, revealing: bool, copied: Option<&str>) -> Text<'static> {
    let mut text = markdown::render(visible, Color::White, copied);
    if revealing {
        let cursor = Span::styled(TYPING_CURSOR, Style::default().fg(Color::Cyan));
        match text.lines.last_mut() {
            Some(line) => line.push_span(cursor),
            None => text.lines.push(Line::from(cursor)),
        }
    }
    text
}

impl Component for AnalysisPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(" AI Analysis ");

        let Some(view) = self.app.analysis.as_ref() else {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let empty = Paragraph::new("No AI analysis available.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        };

        let revealing = view.session.is_revealing();
        let indicator = if revealing {
            Span::styled(" ⏸ typing ", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(" ▶ replay ", Style::default().fg(Color::Green))
        };
        block = block.title_top(Line::from(indicator).right_aligned());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [tabs_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

        let labels: Vec<Line> = view
            .tabs()
            .iter()
            .map(|id| Line::from(self.app.model_name(id).to_string()))
            .collect();
        let tabs = Tabs::new(labels)
            .select(view.active())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));
        frame.render_widget(tabs, tabs_area);

        let text = body_text(view.session.visible_text(), revealing, self.copied);
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });

        self.state.content_height =
            u16::try_from(paragraph.line_count(body_area.width)).unwrap_or(u16::MAX);
        self.state.viewport_height = body_area.height;
        if self.state.follow {
            self.state.scroll = self.state.max_scroll();
        } else {
            self.state.scroll = self.state.scroll.min(self.state.max_scroll());
        }

        frame.render_widget(paragraph.scroll((self.state.scroll, 0)), body_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::AnalysisView;
    use crate::test_support::{sample_models, sample_response, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn app_with_analysis() -> App {
        let mut app = test_app();
        app.models = sample_models();
        let ids = vec!["gemini-pro".to_string(), "llama3".to_string()];
        let response = sample_response(&["gemini-pro", "llama3"]);
        app.analysis = AnalysisView::new(&response, &ids, 1);
        app
    }

    fn render(app: &App, state: &mut AnalysisPanelState) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| AnalysisPanel::new(state, app, None, true).render(f, f.area()))
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
    fn test_empty_state() {
        let app = test_app();
        let text = render(&app, &mut AnalysisPanelState::new());
        assert!(text.contains("No AI analysis available."));
    }

    #[test]
    fn test_tabs_use_model_names() {
        let app = app_with_analysis();
        let text = render(&app, &mut AnalysisPanelState::new());
        assert!(text.contains("Gemini 2.0 Flash"));
        assert!(text.contains("Llama 3 70B"));
    }

    #[test]
    fn test_unknown_model_tab_falls_back_to_id() {
        let mut app = app_with_analysis();
        app.models.clear();
        let text = render(&app, &mut AnalysisPanelState::new());
        assert!(text.contains("gemini-pro"));
    }

    #[test]
    fn test_cursor_while_revealing() {
        let app = app_with_analysis();
        let text = render(&app, &mut AnalysisPanelState::new());
        assert!(text.contains(TYPING_CURSOR));
        assert!(text.contains("typing"));
    }

    #[test]
    fn test_full_text_after_skip() {
        let mut app = app_with_analysis();
        if let Some(view) = app.analysis.as_mut() {
            view.session.skip_to_end();
        }
        let text = render(&app, &mut AnalysisPanelState::new());
        assert!(!text.contains(TYPING_CURSOR));
        assert!(text.contains("replay"));
        assert!(text.contains("gemini-pro says"));
        assert!(text.contains("[1] copy"));
    }

    #[test]
    fn test_body_text_cursor_on_empty_prefix() {
        let text = body_text("", true, None);
        assert_eq!(text.lines.len(), 1);
        assert_eq!(text.lines[0].spans[0].content, TYPING_CURSOR);
    }

    #[test]
    fn test_key_mapping() {
        let mut state = AnalysisPanelState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::CursorRight),
            Some(AnalysisEvent::NextTab)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('p')),
            Some(AnalysisEvent::ToggleReveal)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('s')),
            Some(AnalysisEvent::SkipReveal)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('r')),
            Some(AnalysisEvent::RestartReveal)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('3')),
            Some(AnalysisEvent::CopyCode(3))
        );
        assert_eq!(state.handle_event(&TuiEvent::InputChar('0')), None);
    }

    #[test]
    fn test_scroll_up_stops_following() {
        let mut state = AnalysisPanelState::new();
        state.content_height = 50;
        state.viewport_height = 10;
        state.scroll = 40;
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.follow);
        assert_eq!(state.scroll, 39);

        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.follow, "reaching the bottom re-pins");
    }

    #[test]
    fn test_end_after_scrolling_jumps_to_bottom() {
        let mut state = AnalysisPanelState::new();
        state.content_height = 50;
        state.viewport_height = 10;
        state.scroll = 40;
        state.handle_event(&TuiEvent::ScrollUp);
        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.scroll, 38);

        state.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(state.scroll, 40);
        assert!(state.follow);
    }

    #[test]
    fn test_long_analysis_height_saturates() {
        let mut app = app_with_analysis();
        let long = "line\n\n".repeat(70_000);
        if let Some(view) = app.analysis.as_mut() {
            view.activate(0, long, 99);
            view.session.skip_to_end();
        }
        let mut state = AnalysisPanelState::new();
        render(&app, &mut state);
        assert_eq!(state.content_height, u16::MAX);
        assert_eq!(state.scroll, u16::MAX - state.viewport_height);
    }
}
