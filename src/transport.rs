//! The transport seam between the entity layer and the network.
//!
//! The entity layer never talks to HTTP directly. It issues calls through
//! [`Rest`], a cheap-to-clone handle around any [`Transport`] that adds the
//! response envelope check and the optional call timeout.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, trace};

use crate::error::{DashactylError, TransportError};

/// HTTP methods understood by the Dashactyl API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl From<RequestMethod> for reqwest::Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Something that can deliver a request to the API and hand back the JSON envelope.
///
/// Implementations own domain handling and authentication. They must report
/// network failures and 5xx responses as [`TransportError`]; any other
/// response is returned as JSON for the envelope check in [`Rest`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError>;
}

/// Shared capability handed to managers that need to talk to the API.
#[derive(Clone)]
pub struct Rest {
    transport: Arc<dyn Transport>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for Rest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rest")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Rest {
    pub fn new(transport: Arc<dyn Transport>, timeout: Option<Duration>) -> Self {
        Self { transport, timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Issue a call and return the envelope if its status is `success`.
    pub async fn call(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, DashactylError> {
        trace!("{} {}", method, path);

        let request = self.transport.request(method, path, body);
        let envelope = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| TransportError::Timeout(limit))??,
            None => request.await?,
        };

        ensure_success(path, envelope)
    }

    pub async fn get(&self, path: &str) -> Result<Value, DashactylError> {
        self.call(RequestMethod::Get, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value, DashactylError> {
        self.call(RequestMethod::Post, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<Value, DashactylError> {
        self.call(RequestMethod::Patch, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, DashactylError> {
        self.call(RequestMethod::Delete, path, None).await
    }
}

/// Check the `status` field of a response envelope.
///
/// A missing status counts as a rejection.
pub fn ensure_success(path: &str, envelope: Value) -> Result<Value, DashactylError> {
    let status = envelope
        .get("status")
        .and_then(Value::as_str)
        .map(str::to_owned);

    match status.as_deref() {
        Some("success") => Ok(envelope),
        other => {
            let message = envelope
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .or_else(|| other.map(str::to_owned));
            debug!("Request to {} rejected: {:?}", path, message);
            Err(DashactylError::ApiRejected {
                path: path.to_string(),
                message,
            })
        }
    }
}

/// Percent-encode a caller-supplied value for use as one path segment.
///
/// `/`, `?` and `#` are escaped so the value cannot change the endpoint.
pub fn path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Envelope used when a response carries no body (HTTP 204).
pub(crate) fn empty_success() -> Value {
    json!({ "status": "success" })
}
