use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.aviationstack.com/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Airports,
    Flights,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Airports => "airports",
            Endpoint::Flights => "flights",
        }
    }
}

pub type QueryParams = Vec<(&'static str, String)>;

/// Read-only access to the flight-data service.
///
/// Implementations return the decoded JSON body of a successful call and
/// classify every failure into an [`ApiError`].
#[async_trait]
pub trait FlightApi: Send + Sync {
    async fn request(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value, ApiError>;
}

#[async_trait]
impl<T: FlightApi + ?Sized> FlightApi for Arc<T> {
    async fn request(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value, ApiError> {
        (**self).request(endpoint, params).await
    }
}

/// AviationStack HTTP client. The access key is attached to every query and
/// never appears in logs or `Debug` output.
pub struct AviationClient {
    client: Client,
    base_url: String,
    access_key: String,
}

impl fmt::Debug for AviationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AviationClient")
            .field("base_url", &self.base_url)
            .field("access_key", &"<redacted>")
            .finish()
    }
}

impl AviationClient {
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
        })
    }

    fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl FlightApi for AviationClient {
    async fn request(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value, ApiError> {
        // Blank values are left off the query string entirely.
        let params: Vec<(&str, &str)> = params
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        debug!("GET /{} {:?}", endpoint.path(), params);

        let res = self
            .client
            .get(self.url_for(endpoint))
            .query(&[("access_key", self.access_key.as_str())])
            .query(&params)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            warn!("/{} answered with HTTP {}", endpoint.path(), status.as_u16());
            return Err(ApiError::Transport { status });
        }

        let body = res.bytes().await?;
        let json: Value = serde_json::from_slice(&body)?;
        check_envelope(json)
    }
}

/// Rejects bodies carrying an `error` object before anyone trusts `data`.
pub fn check_envelope(body: Value) -> Result<Value, ApiError> {
    match body.get("error") {
        None | Some(Value::Null) => Ok(body),
        Some(err) => {
            let message = match err.get("info").and_then(Value::as_str) {
                Some(info) if !info.is_empty() => info.to_string(),
                _ => err.to_string(),
            };
            warn!("Upstream error envelope: {}", message);
            Err(ApiError::Upstream(message))
        }
    }
}
