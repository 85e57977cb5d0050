//! Wire types for the search API.
//!
//! Field names follow the server's JSON exactly; Rust-side names are renamed
//! where the wire name is awkward (`ai_model_ids` → `model_ids`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of web results requested when the caller doesn't say otherwise.
pub const DEFAULT_NUM_RESULTS: u32 = 5;

/// An AI backend the server can run an analysis with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub description: String,
}

/// Body of `POST /search`.
///
/// Only constructible through [`SearchRequest::new`], which rejects empty
/// queries and empty model sets.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    #[serde(rename = "ai_model_ids")]
    model_ids: Vec<String>,
    num_results: u32,
}

impl SearchRequest {
    pub fn new(
        query: &str,
        model_ids: &[String],
        num_results: u32,
    ) -> Result<Self, ValidationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        if model_ids.is_empty() {
            return Err(ValidationError::NoModelsSelected);
        }
        Ok(Self {
            query: query.to_string(),
            model_ids: model_ids.to_vec(),
            num_results,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn model_ids(&self) -> &[String] {
        &self.model_ids
    }

    pub fn num_results(&self) -> u32 {
        self.num_results
    }
}

/// Why a submission never left the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyQuery,
    NoModelsSelected,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyQuery => write!(f, "query is empty"),
            ValidationError::NoModelsSelected => write!(f, "no models selected"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WebResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// One model's answer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    #[serde(rename = "ai_model_id")]
    pub model_id: String,
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResponse {
    /// The server echoes the query back; older servers omit it.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub web_results: Vec<WebResult>,
    #[serde(default)]
    pub ai_analyses: BTreeMap<String, Analysis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_request_trims_query() {
        let req = SearchRequest::new("  rust ownership \n", &ids(&["gemini-pro"]), 5).unwrap();
        assert_eq!(req.query(), "rust ownership");
        assert_eq!(req.model_ids(), &["gemini-pro".to_string()]);
        assert_eq!(req.num_results(), 5);
    }

    #[test]
    fn test_request_rejects_blank_query() {
        assert_eq!(
            SearchRequest::new("   \t", &ids(&["llama3"]), 5),
            Err(ValidationError::EmptyQuery)
        );
        assert_eq!(
            SearchRequest::new("", &ids(&["llama3"]), 5),
            Err(ValidationError::EmptyQuery)
        );
    }

    #[test]
    fn test_request_rejects_empty_model_set() {
        assert_eq!(
            SearchRequest::new("rust", &[], 5),
            Err(ValidationError::NoModelsSelected)
        );
    }

    #[test]
    fn test_request_serializes_wire_names() {
        let req = SearchRequest::new("rust", &ids(&["gemini-pro", "llama3"]), 5).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "query": "rust",
                "ai_model_ids": ["gemini-pro", "llama3"],
                "num_results": 5,
            })
        );
    }

    #[test]
    fn test_response_parses_server_payload() {
        let raw = r#"{
            "query": "rust ownership",
            "web_results": [
                {"title": "The Book", "url": "https://doc.rust-lang.org/book/", "snippet": "Ownership is..."}
            ],
            "ai_analyses": {
                "gemini-pro": {"ai_model_id": "gemini-pro", "content": "Ownership means..."}
            }
        }"#;
        let resp: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.query.as_deref(), Some("rust ownership"));
        assert_eq!(resp.web_results.len(), 1);
        assert_eq!(resp.web_results[0].title, "The Book");
        assert_eq!(resp.ai_analyses["gemini-pro"].model_id, "gemini-pro");
    }

    #[test]
    fn test_response_tolerates_missing_sections() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.query.is_none());
        assert!(resp.web_results.is_empty());
        assert!(resp.ai_analyses.is_empty());
    }
}
