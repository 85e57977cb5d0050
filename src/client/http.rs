//! reqwest implementation of [`SearchBackend`].
//!
//! Plain JSON over HTTP: `GET {base}/models` and `POST {base}/search`.
//! No auth headers, no retries, no client-side timeout.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use crate::client::{ClientError, Model, SearchBackend, SearchRequest, SearchResponse};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

pub struct HttpSearchClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSearchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Checks the status and decodes the body, mapping each failure to its
    /// `ClientError` variant.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Search API error: {} - {}", status, message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(
                "Failed to decode response: {} (first 200 chars: {})",
                e,
                body.chars().take(200).collect::<String>()
            );
            ClientError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl SearchBackend for HttpSearchClient {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn fetch_models(&self) -> Result<Vec<Model>, ClientError> {
        let url = self.url("models");
        info!("Fetching models from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let models: Vec<Model> = Self::read_json(response).await?;
        info!("Received {} models", models.len());
        Ok(models)
    }

    async fn submit_search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        let url = self.url("search");
        info!(
            "Search request: query={:?}, models={:?}, num_results={}",
            request.query(),
            request.model_ids(),
            request.num_results()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let result: SearchResponse = Self::read_json(response).await?;
        info!(
            "Search returned {} web results, {} analyses",
            result.web_results.len(),
            result.ai_analyses.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = HttpSearchClient::new("http://localhost:8000/api/");
        assert_eq!(client.endpoint(), "http://localhost:8000/api");
        assert_eq!(client.url("models"), "http://localhost:8000/api/models");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 9 (discard) is essentially never listening on loopback.
        let client = HttpSearchClient::new("http://127.0.0.1:9/api");
        let err = client.fetch_models().await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)), "got {err:?}");
    }
}
