//! Client for the ichnome REST API.
//!
//! Every page view issues exactly one `GET` through a [`Fetch`]
//! implementation. The production implementation is [`ApiClient`], a
//! synchronous `ureq` agent bound to the configured base URL; there are no
//! retries, no timeouts beyond the transport's own, and no caching.

pub mod endpoints;
pub mod types;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::FrontConfig;
use crate::query::QueryMap;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a request produced no usable body.
///
/// The page lifecycle only ever shows the message text, but transport,
/// status and decoding failures stay distinct for logs and callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend could not be reached.
    #[error("Network Error")]
    Transport { detail: String },

    /// The backend answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(#[from] std::io::Error),

    /// The body is not JSON of the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A `GET` relative to the API base URL.
///
/// `path` is already percent-encoded (see [`crate::uria!`]); `query` is
/// serialized as-is, so callers sanitize it first when blanks must go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    pub query: QueryMap,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryMap::new(),
        }
    }

    pub fn with_query(mut self, query: QueryMap) -> Self {
        self.query = query;
        self
    }

    /// Resolve against `base_url` (which carries no trailing `/`).
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/{}{}",
            base_url,
            self.path.trim_start_matches('/'),
            self.query.to_query_string()
        )
    }
}

/// Performs one request and returns the raw body.
pub trait Fetch {
    fn fetch(&self, request: &ApiRequest) -> Result<String, ApiError>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, request: &ApiRequest) -> Result<String, ApiError> {
        (**self).fetch(request)
    }
}

/// Fetch and decode a body into `T`.
pub fn fetch_json<T, F>(fetcher: &F, request: &ApiRequest) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    F: Fetch + ?Sized,
{
    let body = fetcher.fetch(request)?;
    Ok(serde_json::from_str(&body)?)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous HTTP client bound to one API base URL.
///
/// Constructed once at startup and passed to whatever needs it.
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn from_config(config: &FrontConfig) -> Self {
        Self::new(&config.api.endpoint_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Fetch for ApiClient {
    fn fetch(&self, request: &ApiRequest) -> Result<String, ApiError> {
        let url = request.url(&self.base_url);
        debug!(%url, "GET");

        match self.agent.get(&url).call() {
            Ok(resp) => Ok(resp.into_string()?),
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                debug!(%url, status, "backend returned an error status");
                Err(ApiError::Status { status, body })
            }
            Err(ureq::Error::Transport(transport)) => {
                debug!(%url, error = %transport, "backend unreachable");
                Err(ApiError::Transport {
                    detail: transport.to_string(),
                })
            }
        }
    }
}
