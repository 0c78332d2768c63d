/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{ExioError, Result};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Base URL for the EXIO public API
const API_BASE_URL: &str = "https://api.sandbox.ex.io/v1";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Public market metadata client for the EXIO API
#[derive(Debug)]
pub struct ExioClient {
    http_client: Client,
    base_url: String,
}

impl ExioClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, API_BASE_URL)
    }

    /// Create a new client against a custom base URL (used by tests)
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        // The base carries a version path segment, so endpoints are appended
        // textually rather than joined (Url::join would drop "/v1").
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL for an endpoint path
    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, endpoint))?)
    }

    /// Build request builder for an endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.endpoint_url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode a JSON response, mapping non-2xx statuses
    /// to [`ExioError::Api`]
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExioError::api_error(status, message));
        }
        Ok(response.json().await?)
    }
}
