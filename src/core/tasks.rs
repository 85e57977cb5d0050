//! Async halves of the search lifecycle.
//!
//! Each function performs one backend call and folds the outcome into the
//! `Action` that `update()` expects. The TUI spawns them and forwards the
//! result over its action channel.

use log::warn;

use crate::client::{SearchBackend, SearchRequest};
use crate::core::action::Action;

pub async fn load_models(backend: &dyn SearchBackend) -> Action {
    match backend.fetch_models().await {
        Ok(models) => Action::ModelsLoaded(models),
        Err(e) => {
            warn!("Failed to fetch models from {}: {}", backend.endpoint(), e);
            Action::ModelsFailed(e.to_string())
        }
    }
}

pub async fn run_search(backend: &dyn SearchBackend, request: SearchRequest) -> Action {
    match backend.submit_search(&request).await {
        Ok(response) => Action::SearchSucceeded(response),
        Err(e) => {
            warn!("Search for {:?} failed: {}", request.query(), e);
            Action::SearchFailed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::test_support::{StubBackend, sample_models, sample_response};

    #[tokio::test]
    async fn test_load_models_success() {
        let backend = StubBackend::new(Ok(sample_models()), Ok(sample_response(&[])));
        let action = load_models(&backend).await;
        assert_eq!(action, Action::ModelsLoaded(sample_models()));
        assert_eq!(backend.model_calls(), 1);
    }

    #[tokio::test]
    async fn test_load_models_failure() {
        let backend = StubBackend::new(
            Err(ClientError::Network("connection refused".to_string())),
            Ok(sample_response(&[])),
        );
        match load_models(&backend).await {
            Action::ModelsFailed(msg) => assert!(msg.contains("connection refused")),
            other => panic!("expected ModelsFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_search_maps_api_error() {
        let backend = StubBackend::new(
            Ok(sample_models()),
            Err(ClientError::Api {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        let request = SearchRequest::new("rust", &["gemini-pro".to_string()], 5).unwrap();
        match run_search(&backend, request).await {
            Action::SearchFailed(msg) => assert!(msg.contains("500")),
            other => panic!("expected SearchFailed, got {other:?}"),
        }
        assert_eq!(backend.search_calls(), 1);
    }

    #[tokio::test]
    async fn test_run_search_success() {
        let response = sample_response(&["gemini-pro"]);
        let backend = StubBackend::new(Ok(sample_models()), Ok(response.clone()));
        let request = SearchRequest::new("rust", &["gemini-pro".to_string()], 5).unwrap();
        assert_eq!(
            run_search(&backend, request).await,
            Action::SearchSucceeded(response)
        );
    }
}
