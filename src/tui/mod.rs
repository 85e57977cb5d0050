//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values, and carries out the
//! `Effect`s that `update()` returns (spawning requests, driving the
//! typewriter).
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Revealing**: polls every ~16ms so typewriter steps show up promptly.
//! - **Animating** (searching, loading models, copy marker): every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

pub mod clipboard;
mod component;
mod components;
mod event;
pub mod markdown;
mod spinner;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::client::{HttpSearchClient, SearchBackend, SearchRequest};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::tasks;
use crate::core::typewriter::Typewriter;
use crate::tui::clipboard::{CopyFeedback, copy_to_clipboard};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AnalysisEvent, AnalysisPanelState, ModelSelectorEvent, ModelSelectorState, ResultListState,
    SearchBar, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Models,
    Results,
    Analysis,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Search, Focus::Models, Focus::Results, Focus::Analysis];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub search_bar: SearchBar,
    pub model_selector: ModelSelectorState,
    pub result_list: ResultListState,
    pub analysis_panel: AnalysisPanelState,
    pub copy_feedback: CopyFeedback,
    pub focus: Focus,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_bar: SearchBar::new(),
            model_selector: ModelSelectorState::new(),
            result_list: ResultListState::new(),
            analysis_panel: AnalysisPanelState::new(),
            copy_feedback: CopyFeedback::new(),
            focus: Focus::Search, // User expects to type immediately
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Executes `Effect`s: owns the backend handle, the action sender for
/// background tasks, and the typewriter.
struct EffectRunner {
    backend: Arc<dyn SearchBackend>,
    tx: mpsc::Sender<Action>,
    typewriter: Typewriter,
}

impl EffectRunner {
    fn new(backend: Arc<dyn SearchBackend>, tx: mpsc::Sender<Action>, speed: Duration) -> Self {
        let typewriter = Typewriter::new(speed, tx.clone());
        Self {
            backend,
            tx,
            typewriter,
        }
    }

    /// Returns true when the app should quit.
    fn apply(&mut self, effect: Effect, tui: &mut TuiState) -> bool {
        match effect {
            Effect::None => {}
            Effect::SpawnSearch(request) => {
                self.typewriter.cancel();
                tui.result_list.reset();
                self.spawn_search(request);
            }
            Effect::StartReveal { generation, text } => {
                tui.analysis_panel.reset();
                self.typewriter.start(generation, text);
            }
            Effect::CancelReveal => self.typewriter.cancel(),
            Effect::Quit => return true,
        }
        false
    }

    fn spawn_model_load(&self) {
        info!("Fetching model list from {}", self.backend.endpoint());
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = tasks::load_models(backend.as_ref()).await;
            if tx.send(action).is_err() {
                warn!("Failed to send model list: receiver dropped");
            }
        });
    }

    fn spawn_search(&self, request: SearchRequest) {
        info!(
            "Spawning search: {:?} with {} models",
            request.query(),
            request.model_ids().len()
        );
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = tasks::run_search(backend.as_ref(), request).await;
            if tx.send(action).is_err() {
                warn!("Failed to send search result: receiver dropped");
            }
        });
    }
}

/// Apply an action and carry out its effect. Returns true to quit.
fn dispatch(app: &mut App, tui: &mut TuiState, runner: &mut EffectRunner, action: Action) -> bool {
    let effect = update(app, action);
    runner.apply(effect, tui)
}

/// Copy the n-th code block of the visible analysis text.
fn copy_code_block(app: &mut App, tui: &mut TuiState, number: usize) {
    let Some(visible) = app.visible_analysis() else {
        return;
    };
    let blocks = markdown::code_blocks(visible);
    let Some(block) = number.checked_sub(1).and_then(|i| blocks.get(i)) else {
        debug!("No code block {} in visible text ({} present)", number, blocks.len());
        return;
    };
    match copy_to_clipboard(&block.code) {
        Ok(()) => tui.copy_feedback.mark(&block.code, Instant::now()),
        Err(e) => {
            warn!("Copy of code block {} failed: {}", number, e);
            app.status_message = e.to_string();
        }
    }
}

/// Route one terminal event. Returns true to quit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    runner: &mut EffectRunner,
    event: TuiEvent,
) -> bool {
    match event {
        TuiEvent::Resize => return false,
        TuiEvent::ForceQuit => return dispatch(app, tui, runner, Action::Quit),
        TuiEvent::FocusNext => {
            tui.model_selector.show_info = false;
            tui.focus = tui.focus.next();
            return false;
        }
        TuiEvent::FocusPrev => {
            tui.model_selector.show_info = false;
            tui.focus = tui.focus.prev();
            return false;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Search => {
            if let Some(SearchEvent::Submit(text)) = tui.search_bar.handle_event(&event) {
                return dispatch(app, tui, runner, Action::Submit(text));
            }
        }
        Focus::Models => {
            if let Some(ModelSelectorEvent::Toggle(id)) =
                tui.model_selector.handle_event(&event, &app.models)
            {
                return dispatch(app, tui, runner, Action::ToggleModel(id));
            }
        }
        Focus::Results => {
            tui.result_list.handle_event(&event);
        }
        Focus::Analysis => {
            let action = match tui.analysis_panel.handle_event(&event) {
                Some(AnalysisEvent::NextTab) => Action::NextAnalysis,
                Some(AnalysisEvent::PrevTab) => Action::PrevAnalysis,
                Some(AnalysisEvent::ToggleReveal) => Action::ToggleReveal,
                Some(AnalysisEvent::SkipReveal) => Action::SkipReveal,
                Some(AnalysisEvent::RestartReveal) => Action::RestartReveal,
                Some(AnalysisEvent::CopyCode(n)) => {
                    copy_code_block(app, tui, n);
                    return false;
                }
                None => return false,
            };
            return dispatch(app, tui, runner, action);
        }
    }
    false
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn SearchBackend> = Arc::new(HttpSearchClient::new(config.base_url.clone()));
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runner = EffectRunner::new(backend, tx, config.typing_speed);
    runner.spawn_model_load();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let now = Instant::now();
        if tui.copy_feedback.expire(now) {
            needs_redraw = true;
        }

        let revealing = runner.typewriter.is_running();
        let animating = app.is_loading
            || app.models_loading
            || tui.copy_feedback.active(now).is_some();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if revealing {
            Duration::from_millis(16)
        } else if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout)?;

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        let mut pending = first_event;
        while let Some(event) = pending {
            if handle_event(&mut app, &mut tui, &mut runner, event) {
                break 'main;
            }
            pending = poll_event_immediate()?;
        }

        // Handle background task actions (model list, search, typewriter)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if !matches!(action, Action::RevealStep { .. }) {
                debug!("Event loop received: {:?}", action);
            }
            if dispatch(&mut app, &mut tui, &mut runner, action) {
                break 'main;
            }
        }
    }

    runner.typewriter.cancel();
    info!("Luma shutting down");
    ratatui::restore();
    Ok(())
}
