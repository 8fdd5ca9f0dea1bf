//! HTTP request/response data and the blocking transport that moves them.
//!
//! # Design
//! `UnuClient` builds an `HttpRequest` and parses an `HttpResponse` without
//! touching the network. The `Transport` trait sits between the two, so the
//! same client can run over `ureq` in production and over a recording fake
//! in tests.
//!
//! All fields use owned types so values can be handed to another thread or
//! stored for later inspection.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// A form POST described as plain data.
///
/// The method is always POST; the body is already form-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Decode the body back into `(key, value)` pairs, in wire order.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }

    /// All values sent under `key`.
    pub fn form_values(&self, key: &str) -> Vec<String> {
        self.form_fields()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes one request and returns the full response.
///
/// Implementations block the calling thread until the response body has been
/// read or the request fails. They must not retry.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport on a shared `ureq` agent.
///
/// Non-2xx statuses are returned as data: the endpoint reports failures in
/// the JSON body, so the status code alone says little.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.timeout())
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.send(request.body.as_bytes()).map_err(|err| {
            warn!(url = %request.url, error = %err, "request failed");
            ApiError::from(err)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // ureq caps bodies at 10 MiB by default; a full task page can exceed that.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_string()
            .map_err(|err| {
                warn!(url = %request.url, status, error = %err, "failed to read response body");
                ApiError::from(err)
            })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
