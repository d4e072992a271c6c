use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};

use super::upstream_error::UpstreamError;
use crate::infrastructure::config::Config;

pub const CARTESIA_VERSION_HEADER: &str = "Cartesia-Version";

/// Thin wrapper over `reqwest::Client` that knows the Cartesia base URL and
/// attaches the standard headers (bearer credential + API version).
#[derive(Debug, Clone)]
pub struct CartesiaClient {
    http_client: Client,
    base_url: String,
    api_version: String,
}

impl CartesiaClient {
    pub fn new(base_url: &str, api_version: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: api_version.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.cartesia_api_url,
            &config.cartesia_api_version,
            Duration::from_millis(config.cartesia_timeout_ms),
        )
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str, bearer_token: &str) -> RequestBuilder {
        self.with_headers(self.http_client.get(self.url(path)), bearer_token)
    }

    pub fn post(&self, path: &str, bearer_token: &str) -> RequestBuilder {
        self.with_headers(self.http_client.post(self.url(path)), bearer_token)
    }

    fn with_headers(&self, builder: RequestBuilder, bearer_token: &str) -> RequestBuilder {
        builder
            .bearer_auth(bearer_token)
            .header(CARTESIA_VERSION_HEADER, &self.api_version)
    }
}

/// Send a request and turn transport failures and non-2xx statuses into
/// an `UpstreamError`. Successful responses are returned untouched.
pub async fn send_checked(request: RequestBuilder) -> Result<Response, UpstreamError> {
    let response = request.send().await.map_err(UpstreamError::transport)?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let headers = response.headers().clone();
    let body = response.bytes().await.unwrap_or_default();
    Err(UpstreamError::from_response(status, &headers, &body))
}
