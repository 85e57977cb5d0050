pub mod backend;
pub mod http;
pub mod types;

pub use backend::{ClientError, SearchBackend};
pub use http::{DEFAULT_BASE_URL, HttpSearchClient};
pub use types::{
    Analysis, DEFAULT_NUM_RESULTS, Model, SearchRequest, SearchResponse, ValidationError,
    WebResult,
};
