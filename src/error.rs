//! Error taxonomy for the flight search pipeline.
//!
//! Configuration problems are detected locally before any request is built.
//! Everything the upstream service can do wrong is an [`ApiError`], which the
//! resolver and aggregator pass through untouched. [`SearchError`] is what the
//! search entry point hands back to the UI.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing API key configuration.")]
    MissingAccessKey,
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("HTTP {}", .status.as_u16())]
    Transport { status: StatusCode },
    /// No response at all (DNS, connect, timeout). The request URL is
    /// stripped, since its query string carries the access key.
    #[error("network error: {0}")]
    Network(reqwest::Error),
    /// A well-formed response carrying an `error` envelope.
    #[error("{0}")]
    Upstream(String),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.without_url())
    }
}

impl ApiError {
    /// True for failures raised below the application layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. } | ApiError::Network(_))
    }
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Select a country.")]
    NoCountrySelected,
    #[error("Unsupported country code: {0}")]
    UnknownCountry(String),
    #[error("A search is already running.")]
    InProgress,
}
