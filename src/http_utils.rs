//! HTTP transport for the Dashactyl client.
//!
//! [`HttpTransport`] is the production [`Transport`]: it joins the panel
//! domain with the request path, attaches the bearer key and turns HTTP
//! responses into JSON envelopes.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, error, trace};

use crate::client::ClientConfig;
use crate::error::TransportError;
use crate::transport::{empty_success, RequestMethod, Transport};

/// Value sent in the `User-Agent` header
pub const USER_AGENT: &str = "dashactyl-rs";

/// Default client-level timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for HTTP requests with common settings
#[derive(Debug, Clone)]
pub struct HttpRequestConfig {
    /// Base URL of the panel, without a trailing slash
    pub base_url: String,
    /// API key sent as a bearer token
    pub api_key: String,
    /// Headers included with every request
    pub default_headers: HashMap<String, String>,
    pub timeout: Duration,
}

impl HttpRequestConfig {
    pub fn new(domain: &str, api_key: &str) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url: normalize_domain(domain),
            api_key: api_key.to_string(),
            default_headers,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_client_config(config: &ClientConfig) -> Self {
        let mut http = Self::new(&config.domain, &config.api_key);
        if let Some(timeout) = config.timeout {
            http.timeout = timeout;
        }
        http
    }
}

/// Strip trailing slashes so paths can be appended verbatim
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('/').to_string()
}

/// reqwest-backed [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: HttpRequestConfig,
}

impl HttpTransport {
    pub fn new(config: HttpRequestConfig) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpRequestConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.into(), &url)
            .bearer_auth(&self.config.api_key);
        for (key, value) in &self.config.default_headers {
            request = request.header(key, value);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        trace!("{} {} answered {}", method, url, status);

        if status == StatusCode::NO_CONTENT {
            return Ok(empty_success());
        }
        if status.is_server_error() {
            error!("Server error {} from {}", status, url);
            return Err(TransportError::Server {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        match serde_json::from_str::<Value>(&text) {
            Ok(envelope) if envelope.is_object() => Ok(envelope),
            _ if status.is_success() => {
                error!("Failed to parse response from {}: {}", url, text);
                Err(TransportError::InvalidResponse(format!(
                    "expected a JSON object from {}",
                    url
                )))
            }
            _ => Ok(json!({
                "status": "failed",
                "code": status.as_u16(),
                "message": status.canonical_reason().unwrap_or("request failed"),
            })),
        }
    }
}
