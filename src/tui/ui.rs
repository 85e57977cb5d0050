use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    AnalysisPanel, ModelSelector, ModelSelectorState, ResultList, TitleBar,
};
use crate::tui::spinner;
use crate::tui::{Focus, TuiState};

const TAGLINE: &str = "Enhance your search experience with AI-powered insights from multiple models";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let banners = banner_lines(app);
    let models_height = ModelSelectorState::height(app.models.len());
    let [title_area, search_area, models_area, banner_area, body_area, footer_area] =
        Layout::vertical([
            Length(1),
            Length(3),
            Length(models_height),
            Length(banners.len() as u16),
            Min(0),
            Length(1),
        ])
        .areas(frame.area());

    let mut title_bar = TitleBar::new(
        app.status_message.clone(),
        app.is_loading || app.models_loading,
        spinner_frame,
    );
    title_bar.render(frame, title_area);

    tui.search_bar.disabled = app.is_loading;
    tui.search_bar.focused = tui.focus == Focus::Search;
    tui.search_bar.render(frame, search_area);

    if !banners.is_empty() {
        frame.render_widget(Paragraph::new(banners), banner_area);
    }

    if app.is_loading {
        draw_loading(frame, body_area, spinner_frame);
    } else if let Some(response) = &app.search_results {
        let [results_area, analysis_area] =
            Layout::horizontal([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
                .areas(body_area);
        ResultList::new(
            &mut tui.result_list,
            &response.web_results,
            tui.focus == Focus::Results,
        )
        .render(frame, results_area);

        let copied = tui.copy_feedback.active(Instant::now());
        AnalysisPanel::new(
            &mut tui.analysis_panel,
            app,
            copied,
            tui.focus == Focus::Analysis,
        )
        .render(frame, analysis_area);
    } else {
        draw_welcome(frame, body_area);
    }

    frame.render_widget(
        Paragraph::new(footer_hints(tui.focus)).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );

    // Rendered last: the info popover overlays everything below it
    ModelSelector::new(
        &mut tui.model_selector,
        &app.models,
        &app.selection,
        app.models_loading,
        tui.focus == Focus::Models,
    )
    .render(frame, models_area);
}

/// Model-list and search errors, each on its own line.
fn banner_lines(app: &App) -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    app.model_error
        .iter()
        .chain(app.error.iter())
        .map(|msg| Line::from(Span::styled(format!(" ⚠ {msg}"), style)))
        .collect()
}

fn draw_loading(frame: &mut Frame, area: Rect, spinner_frame: usize) {
    let [_, center, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let line = Line::from(vec![
        Span::styled(
            spinner::frame_at(spinner_frame),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" Searching the web and consulting AI models..."),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), center);
}

fn draw_welcome(frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [_, center, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(inner);
    let text = vec![
        Line::from(Span::styled(
            "Welcome to LUMA",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        center,
    );
}

fn footer_hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Search => " Enter search │ Tab next pane │ Ctrl+C quit",
        Focus::Models => " ↑↓ move │ Space toggle │ i info │ Tab next pane │ Ctrl+C quit",
        Focus::Results => " ↑↓ scroll │ PgUp/PgDn page │ Tab next pane │ Ctrl+C quit",
        Focus::Analysis => {
            " ←→ model │ p pause/play │ s skip │ r restart │ 1-9 copy code │ ↑↓ scroll │ Ctrl+C quit"
        }
    }
}
