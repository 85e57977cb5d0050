//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::client::{
    Analysis, ClientError, Model, SearchBackend, SearchRequest, SearchResponse, WebResult,
};
use crate::core::state::App;

/// A backend with canned answers that counts its calls.
pub struct StubBackend {
    models: Result<Vec<Model>, ClientError>,
    search: Result<SearchResponse, ClientError>,
    model_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl StubBackend {
    pub fn new(
        models: Result<Vec<Model>, ClientError>,
        search: Result<SearchResponse, ClientError>,
    ) -> Self {
        Self {
            models,
            search,
            model_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
        }
    }

    pub fn model_calls(&self) -> usize {
        self.model_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchBackend for StubBackend {
    fn endpoint(&self) -> &str {
        "stub"
    }

    async fn fetch_models(&self) -> Result<Vec<Model>, ClientError> {
        self.model_calls.fetch_add(1, Ordering::SeqCst);
        self.models.clone()
    }

    async fn submit_search(&self, _request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.search.clone()
    }
}

/// Creates a test App with the default result count.
pub fn test_app() -> App {
    App::new(crate::client::DEFAULT_NUM_RESULTS)
}

pub fn sample_models() -> Vec<Model> {
    vec![
        Model {
            id: "gemini-pro".to_string(),
            name: "Gemini 2.0 Flash".to_string(),
            provider: "Google".to_string(),
            description: "Fast multimodal model".to_string(),
        },
        Model {
            id: "llama3".to_string(),
            name: "Llama 3 70B".to_string(),
            provider: "Groq".to_string(),
            description: "Open-weights model served by Groq".to_string(),
        },
    ]
}

/// A response with two web results and one analysis per ID in `ids`.
pub fn sample_response(ids: &[&str]) -> SearchResponse {
    let ai_analyses: BTreeMap<String, Analysis> = ids
        .iter()
        .map(|id| {
            (
                id.to_string(),
                Analysis {
                    model_id: id.to_string(),
                    content: format!(
                        "## {id} says\n\nOwnership, borrowing and lifetimes.\n\n```rust\nlet s = String::from(\"hi\");\n```"
                    ),
                },
            )
        })
        .collect();

    SearchResponse {
        query: Some("rust ownership".to_string()),
        web_results: vec![
            WebResult {
                title: "What is Ownership? - The Rust Programming Language".to_string(),
                url: "https://doc.rust-lang.org/book/ch04-01-what-is-ownership.html".to_string(),
                snippet: "Ownership is a set of rules that govern how a Rust program manages memory."
                    .to_string(),
            },
            WebResult {
                title: "Rust By Example: Ownership".to_string(),
                url: "https://doc.rust-lang.org/rust-by-example/scope/move.html".to_string(),
                snippet: "Because variables are in charge of freeing their own resources..."
                    .to_string(),
            },
        ],
        ai_analyses,
    }
}
