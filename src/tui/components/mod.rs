//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: app name, status, spinner
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events. Persistent state lives in
//! `TuiState`; a transient wrapper borrows it each frame alongside props.
//! - `SearchBar`: query input
//! - `ModelSelectorState` / `ModelSelector`: model checklist and info popover
//! - `ResultListState` / `ResultList`: scrollable web result cards
//! - `AnalysisPanelState` / `AnalysisPanel`: per-model tabs with typewriter text
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, not by reaching into global
//! state:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! ResultList::new(&mut tui.result_list, &response.web_results, focused).render(frame, area);
//!
//! // Bad: hidden dependency on App
//! result_list.render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (top status bar)
//! ├── search_bar.rs      (query input)
//! ├── model_selector.rs  (model checklist)
//! ├── result_list.rs     (web result cards)
//! └── analysis_panel.rs  (analysis tabs)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod analysis_panel;
pub mod model_selector;
pub mod result_list;
pub mod search_bar;
pub use analysis_panel::{AnalysisEvent, AnalysisPanel, AnalysisPanelState};
pub use model_selector::{ModelSelector, ModelSelectorEvent, ModelSelectorState};
pub use result_list::{ResultList, ResultListState};
pub use search_bar::{SearchBar, SearchEvent};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` to at most `max_width` display columns, ending in `…` if shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
