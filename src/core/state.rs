//! # Application State
//!
//! Core business state for Luma. Domain logic only: no TUI types. Presentation
//! state (focus, scroll offsets, copy feedback) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── query: String                     // last submitted query text
//! ├── models: Vec<Model>                // fetched once at startup
//! ├── selection: ModelSelection         // chosen model IDs, selection order
//! ├── search_results: Option<Response>  // last successful search
//! ├── analysis: Option<AnalysisView>    // active tab + its reveal session
//! ├── is_loading: bool                  // search in flight
//! ├── error: Option<String>             // search failure banner
//! └── model_error: Option<String>       // model fetch failure banner
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::client::{Model, SearchResponse};
use crate::core::config::ResolvedConfig;
use crate::core::reveal::RevealSession;
use crate::core::selection::ModelSelection;

pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again later.";
pub const MODELS_FAILED_MESSAGE: &str = "Failed to load AI models. Please try again later.";

pub struct App {
    pub query: String,
    pub models: Vec<Model>,
    /// True until the model list request settles.
    pub models_loading: bool,
    pub selection: ModelSelection,
    pub search_results: Option<SearchResponse>,
    pub analysis: Option<AnalysisView>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Stays up for the whole run; submissions don't clear it.
    pub model_error: Option<String>,
    pub status_message: String,
    pub num_results: u32,
    /// Model IDs of the request in flight, used to order the result tabs.
    pub(crate) requested_models: Vec<String>,
    next_generation: u64,
}

impl App {
    pub fn new(num_results: u32) -> Self {
        Self {
            query: String::new(),
            models: Vec::new(),
            models_loading: true,
            selection: ModelSelection::new(),
            search_results: None,
            analysis: None,
            is_loading: false,
            error: None,
            model_error: None,
            status_message: String::from("Loading models..."),
            num_results,
            requested_models: Vec::new(),
            next_generation: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.num_results)
    }

    /// Hands out a fresh reveal generation. Never reused within a run.
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Display name for a model ID, falling back to the ID itself.
    pub fn model_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.models
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.as_str())
            .unwrap_or(id)
    }

    pub fn is_known_model(&self, id: &str) -> bool {
        self.models.iter().any(|m| m.id == id)
    }

    /// Analysis text for a model in the current result set.
    pub fn analysis_content(&self, model_id: &str) -> Option<&str> {
        self.search_results
            .as_ref()
            .and_then(|r| r.ai_analyses.get(model_id))
            .map(|a| a.content.as_str())
    }

    /// The text the presenter should draw for the active tab.
    pub fn visible_analysis(&self) -> Option<&str> {
        self.analysis.as_ref().map(|v| v.session.visible_text())
    }
}

/// The tab strip over the per-model analyses and the one live reveal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisView {
    tabs: Vec<String>,
    active: usize,
    pub session: RevealSession,
}

impl AnalysisView {
    /// Builds the view with the first tab active, or `None` when the response
    /// carries no analyses. Tabs follow `requested` order; unrequested IDs the
    /// server returned anyway come after, in key order.
    pub fn new(response: &SearchResponse, requested: &[String], generation: u64) -> Option<Self> {
        let mut tabs: Vec<String> = requested
            .iter()
            .filter(|id| response.ai_analyses.contains_key(id.as_str()))
            .cloned()
            .collect();
        for id in response.ai_analyses.keys() {
            if !tabs.contains(id) {
                tabs.push(id.clone());
            }
        }

        let first = tabs.first()?;
        let text = response.ai_analyses[first].content.clone();
        Some(Self {
            tabs,
            active: 0,
            session: RevealSession::new(text, generation),
        })
    }

    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_model_id(&self) -> &str {
        &self.tabs[self.active]
    }

    /// Makes `index` the active tab with a fresh session over `text`.
    pub(crate) fn activate(&mut self, index: usize, text: String, generation: u64) {
        self.active = index;
        self.session = RevealSession::new(text, generation);
    }
}
