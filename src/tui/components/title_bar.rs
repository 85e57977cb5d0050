//! # TitleBar Component
//!
//! Top status bar: application name, status message, and a spinner while a
//! search or the model list is loading.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.status_message.clone(), app.is_loading, spinner_frame);
//! title_bar.render(frame, area);
//! ```
//!
//! ### Props-in-Struct Pattern
//!
//! Props are struct fields rather than render() parameters so the component
//! fits the fixed `Component::render` signature.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::spinner;

pub const APP_TITLE: &str = "LUMA - Luminous AI Search";

/// Top status bar.
///
/// # Props
///
/// - `status_message`: transient status (e.g. "Searching...", "3 models available")
/// - `busy`: whether to show the spinner
/// - `spinner_frame`: animation tick
pub struct TitleBar {
    pub status_message: String,
    pub busy: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(status_message: String, busy: bool, spinner_frame: usize) -> Self {
        Self {
            status_message,
            busy,
            spinner_frame,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        if self.busy {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                spinner::frame_at(self.spinner_frame),
                Style::default().fg(Color::Yellow),
            ));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(self.status_message.clone()));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
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
        let mut title_bar = TitleBar::new("Searching...".to_string(), false, 0);
        let text = render(&mut title_bar);
        assert!(text.contains("LUMA - Luminous AI Search"));
        assert!(text.contains("Searching..."));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new(String::new(), false, 0);
        let text = render(&mut title_bar);
        assert!(text.contains("LUMA"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_spinner_only_when_busy() {
        let mut idle = TitleBar::new(String::new(), false, 0);
        assert!(!render(&mut idle).contains(spinner::frame_at(0)));

        let mut busy = TitleBar::new(String::new(), true, 0);
        assert!(render(&mut busy).contains(spinner::frame_at(0)));
    }
}
