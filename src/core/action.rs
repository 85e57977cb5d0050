//! # Actions
//!
//! Everything that can happen in Luma becomes an `Action`.
//! User presses Enter in the search bar? That's `Action::Submit(text)`.
//! Server answers? That's `Action::SearchSucceeded(response)`.
//! The typewriter ticks? That's `Action::RevealStep { generation, len }`.
//!
//! `update()` applies an action to the state and returns the one `Effect` the
//! caller has to carry out (spawn a request, start or stop the typewriter).
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::client::{Model, SearchRequest, SearchResponse};
use crate::core::state::{AnalysisView, App, MODELS_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Startup
    ModelsLoaded(Vec<Model>),
    ModelsFailed(String),

    // User
    ToggleModel(String),
    Submit(String),
    SelectAnalysis(usize),
    NextAnalysis,
    PrevAnalysis,
    /// Pause control: skip to the end while revealing, restart otherwise.
    ToggleReveal,
    SkipReveal,
    RestartReveal,
    Quit,

    // Background tasks
    SearchSucceeded(SearchResponse),
    SearchFailed(String),
    RevealStep { generation: u64, len: usize },
    RevealSettled { generation: u64 },
}

/// Side effect requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Discard any running reveal and send this request.
    SpawnSearch(SearchRequest),
    /// Replace any running reveal with a new one.
    StartReveal { generation: u64, text: String },
    /// Abort the running reveal.
    CancelReveal,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ModelsLoaded(models) => {
            info!("Loaded {} models", models.len());
            app.selection.select_first(&models);
            app.models = models;
            app.models_loading = false;
            app.status_message = format!("{} models available", app.models.len());
            Effect::None
        }
        Action::ModelsFailed(reason) => {
            warn!("Model list failed: {}", reason);
            app.models_loading = false;
            app.model_error = Some(MODELS_FAILED_MESSAGE.to_string());
            app.status_message = String::from("Models unavailable");
            Effect::None
        }
        Action::ToggleModel(id) => {
            if app.is_known_model(&id) {
                app.selection.toggle(&id);
                debug!("Selection now {:?}", app.selection.ids());
            } else {
                debug!("Ignoring toggle of unknown model {:?}", id);
            }
            Effect::None
        }
        Action::Submit(text) => {
            if app.is_loading {
                debug!("Submit ignored: search already in flight");
                return Effect::None;
            }
            let request = match SearchRequest::new(&text, app.selection.ids(), app.num_results) {
                Ok(request) => request,
                Err(e) => {
                    debug!("Submit suppressed: {}", e);
                    return Effect::None;
                }
            };

            app.query = request.query().to_string();
            app.is_loading = true;
            app.error = None;
            app.search_results = None;
            app.analysis = None;
            app.requested_models = request.model_ids().to_vec();
            app.status_message = String::from("Searching...");
            Effect::SpawnSearch(request)
        }
        Action::SearchSucceeded(response) => {
            if !app.is_loading {
                warn!("Dropping search response that arrived while idle");
                return Effect::None;
            }
            app.is_loading = false;
            app.status_message = format!(
                "{} web results, {} analyses",
                response.web_results.len(),
                response.ai_analyses.len()
            );

            let generation = app.next_generation();
            app.analysis = AnalysisView::new(&response, &app.requested_models, generation);
            app.search_results = Some(response);

            match &app.analysis {
                Some(view) => Effect::StartReveal {
                    generation,
                    text: view.session.full_text().to_string(),
                },
                None => Effect::None,
            }
        }
        Action::SearchFailed(reason) => {
            warn!("Search failed: {}", reason);
            app.is_loading = false;
            app.error = Some(SEARCH_FAILED_MESSAGE.to_string());
            app.search_results = None;
            app.status_message = String::from("Search failed");
            if app.analysis.take().is_some() {
                Effect::CancelReveal
            } else {
                Effect::None
            }
        }
        Action::SelectAnalysis(index) => select_tab(app, index),
        Action::NextAnalysis => match tab_position(app) {
            Some((active, count)) => select_tab(app, (active + 1) % count),
            None => Effect::None,
        },
        Action::PrevAnalysis => match tab_position(app) {
            Some((active, count)) => select_tab(app, (active + count - 1) % count),
            None => Effect::None,
        },
        Action::ToggleReveal => {
            match app.analysis.as_ref().map(|v| v.session.is_revealing()) {
                Some(true) => update(app, Action::SkipReveal),
                Some(false) => update(app, Action::RestartReveal),
                None => Effect::None,
            }
        }
        Action::SkipReveal => {
            let skipped = app
                .analysis
                .as_mut()
                .is_some_and(|view| view.session.skip_to_end());
            if skipped {
                debug!("Reveal skipped to end");
                Effect::CancelReveal
            } else {
                Effect::None
            }
        }
        Action::RestartReveal => {
            if app.analysis.is_none() {
                return Effect::None;
            }
            let generation = app.next_generation();
            match app.analysis.as_mut() {
                Some(view) => {
                    view.session.restart(generation);
                    Effect::StartReveal {
                        generation,
                        text: view.session.full_text().to_string(),
                    }
                }
                None => Effect::None,
            }
        }
        Action::RevealStep { generation, len } => {
            if let Some(view) = app.analysis.as_mut()
                && !view.session.apply_step(generation, len)
            {
                debug!("Dropped stale reveal step (generation={}, len={})", generation, len);
            }
            Effect::None
        }
        Action::RevealSettled { generation } => {
            if let Some(view) = app.analysis.as_mut()
                && view.session.settle(generation)
            {
                debug!("Reveal {} settled", generation);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// `(active, tab_count)` of the analysis view, if there is one.
fn tab_position(app: &App) -> Option<(usize, usize)> {
    app.analysis
        .as_ref()
        .map(|view| (view.active(), view.tabs().len()))
}

/// Switches the active analysis tab. The outgoing session is replaced, so
/// its queued steps no longer match any generation.
fn select_tab(app: &mut App, index: usize) -> Effect {
    let target = match &app.analysis {
        Some(view) if index < view.tabs().len() && index != view.active() => {
            view.tabs()[index].clone()
        }
        _ => return Effect::None,
    };
    let text = app.analysis_content(&target).unwrap_or_default().to_string();
    let generation = app.next_generation();
    match app.analysis.as_mut() {
        Some(view) => {
            view.activate(index, text.clone(), generation);
            info!("Switched to analysis tab {} ({})", index, target);
            Effect::StartReveal { generation, text }
        }
        None => Effect::None,
    }
}
