//! # Model Selector Component
//!
//! Lists every model the backend offers with a check mark for the ones that
//! will be consulted. `i` opens an info popover for the highlighted model.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ModelSelectorState` lives in `TuiState`
//! - `ModelSelector` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap,
};
use unicode_width::UnicodeWidthStr;

use crate::client::Model;
use crate::core::selection::ModelSelection;
use crate::tui::component::Component;
use crate::tui::components::truncate_to_width;
use crate::tui::event::TuiEvent;

/// Rows of models shown before the list scrolls.
pub const MAX_VISIBLE_MODELS: u16 = 4;

/// Persistent state for the model selector.
#[derive(Default)]
pub struct ModelSelectorState {
    pub highlighted: usize,
    pub list_state: ListState,
    pub show_info: bool,
}

/// Events emitted by the model selector.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSelectorEvent {
    Toggle(String),
}

impl ModelSelectorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer height the selector wants for `model_count` entries.
    pub fn height(model_count: usize) -> u16 {
        (model_count as u16).clamp(1, MAX_VISIBLE_MODELS) + 2
    }

    /// Handle a key event against the current model list.
    pub fn handle_event(&mut self, event: &TuiEvent, models: &[Model]) -> Option<ModelSelectorEvent> {
        if self.show_info {
            if matches!(event, TuiEvent::Escape | TuiEvent::InputChar('i')) {
                self.show_info = false;
            }
            return None;
        }
        if models.is_empty() {
            return None;
        }
        self.highlighted = self.highlighted.min(models.len() - 1);

        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.highlighted = (self.highlighted + 1).min(models.len() - 1);
                None
            }
            TuiEvent::CursorHome => {
                self.highlighted = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.highlighted = models.len() - 1;
                None
            }
            TuiEvent::InputChar('i') => {
                self.show_info = true;
                None
            }
            TuiEvent::InputChar(' ') | TuiEvent::Submit => models
                .get(self.highlighted)
                .map(|model| ModelSelectorEvent::Toggle(model.id.clone())),
            _ => None,
        }
    }
}

/// Transient render wrapper for the model selector.
pub struct ModelSelector<'a> {
    state: &'a mut ModelSelectorState,
    models: &'a [Model],
    selection: &'a ModelSelection,
    loading: bool,
    focused: bool,
}

impl<'a> ModelSelector<'a> {
    pub fn new(
        state: &'a mut ModelSelectorState,
        models: &'a [Model],
        selection: &'a ModelSelection,
        loading: bool,
        focused: bool,
    ) -> Self {
        Self {
            state,
            models,
            selection,
            loading,
            focused,
        }
    }

    fn render_info(&self, frame: &mut Frame) {
        let Some(model) = self.models.get(self.state.highlighted) else {
            return;
        };
        let overlay = centered_rect(60, 40, frame.area());
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", model.name))
            .title_bottom(Line::from(" Esc Close ").centered())
            .padding(Padding::uniform(1));

        let mut lines = vec![
            Line::from(Span::styled(
                format!("Provider: {}", model.provider),
                Style::default().fg(provider_color(&model.provider)),
            )),
            Line::from(Span::styled(
                model.id.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
        ];
        if !model.description.is_empty() {
            lines.push(Line::from(model.description.clone()));
        }

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            overlay,
        );
    }
}

impl Component for ModelSelector<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let title = if self.models.is_empty() {
            " AI Models ".to_string()
        } else {
            format!(" AI Models ({} selected) ", self.selection.len())
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(title)
            .padding(Padding::horizontal(1));

        if self.models.is_empty() {
            let message = if self.loading {
                "Loading available AI models..."
            } else {
                "No AI models available."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let highlighted = self.state.highlighted.min(self.models.len() - 1);

        let items: Vec<ListItem> = self
            .models
            .iter()
            .enumerate()
            .map(|(i, model)| {
                let checked = self.selection.contains(&model.id);
                let mark = if checked { "[✓] " } else { "[ ] " };
                let provider_tag = format!("[{}]", model.provider);
                let name_width = inner_width
                    .saturating_sub(mark.width())
                    .saturating_sub(provider_tag.width() + 2);
                let name = truncate_to_width(&model.name, name_width);
                let padded_name = format!("{:<width$}", name, width = name_width);

                let is_cursor = self.focused && i == highlighted;
                let style = if is_cursor {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if checked {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let mark_style = if checked && !is_cursor {
                    Style::default().fg(Color::Green)
                } else {
                    style
                };
                let tag_style = if is_cursor {
                    style
                } else {
                    Style::default().fg(provider_color(&model.provider))
                };

                ListItem::new(Line::from(vec![
                    Span::styled(mark, mark_style),
                    Span::styled(padded_name, style),
                    Span::styled("  ", style),
                    Span::styled(provider_tag, tag_style),
                ]))
            })
            .collect();

        self.state.list_state.select(Some(highlighted));
        frame.render_stateful_widget(List::new(items).block(block), area, &mut self.state.list_state);

        if self.state.show_info {
            self.render_info(frame);
        }
    }
}

fn provider_color(provider: &str) -> Color {
    match provider.to_ascii_lowercase().as_str() {
        "google" => Color::Blue,
        "groq" => Color::Magenta,
        "openai" => Color::Green,
        "anthropic" => Color::Yellow,
        _ => Color::LightBlue,
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
