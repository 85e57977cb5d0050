use std::fmt;

use async_trait::async_trait;

use super::types::{Model, SearchRequest, SearchResponse};

/// Errors that can occur talking to the search server.
/// A single attempt is made per call; nothing here is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// Server answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body wasn't the JSON we expected.
    Decode(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "network error: {msg}"),
            ClientError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ClientError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Where requests go, for logs and the status line.
    fn endpoint(&self) -> &str;

    /// Lists the AI models the server can analyze with.
    async fn fetch_models(&self) -> Result<Vec<Model>, ClientError>;

    /// Runs a web search and one analysis per requested model.
    async fn submit_search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError>;
}
