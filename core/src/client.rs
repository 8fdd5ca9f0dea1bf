//! Form-encoded RPC client for the UNU API.
//!
//! # Design
//! `UnuClient` holds an immutable `ClientConfig` and a `Transport`; it keeps
//! no mutable state between calls, so one client can be shared across
//! threads. A call is split into `build_request` (pure), the transport
//! round-trip, and `parse_response` (pure), which keeps the wire format
//! testable without a server.

use tracing::{debug, info_span, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::params::Params;
use crate::response::Response;

/// Form field carrying the shared secret. Reserved: callers cannot set it.
pub const TOKEN_FIELD: &str = "api_key";
/// Form field carrying the action name. Reserved: callers cannot set it.
pub const ACTION_FIELD: &str = "action";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client for the UNU task-management API.
#[derive(Debug, Clone)]
pub struct UnuClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl UnuClient<UreqTransport> {
    pub fn new(url: &str, token: &str) -> Self {
        Self::from_config(ClientConfig::new(url, token))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::from_config(&config);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> UnuClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the POST for `action`.
    ///
    /// The body always starts with the token and the action name; caller
    /// params follow in key order. Caller-supplied `action` and `api_key`
    /// entries are dropped.
    pub fn build_request(&self, action: &str, params: Option<&Params>) -> Result<HttpRequest, ApiError> {
        if action.trim().is_empty() {
            return Err(ApiError::InvalidArgument("action name is empty".to_string()));
        }

        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair(TOKEN_FIELD, &self.config.token);
        form.append_pair(ACTION_FIELD, action);
        for (key, value) in params.into_iter().flatten() {
            if key == ACTION_FIELD || key == TOKEN_FIELD {
                debug!(action, field = %key, "ignoring caller-supplied reserved parameter");
                continue;
            }
            form.append_pair(key, &value.to_form_value());
        }

        let mut headers = vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())];
        if let Some(user_agent) = &self.config.user_agent {
            headers.push(("user-agent".to_string(), user_agent.clone()));
        }

        Ok(HttpRequest {
            url: self.config.url.clone(),
            headers,
            body: form.finish(),
        })
    }

    /// Decode a response and apply the success check.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Response, ApiError> {
        decode_response(&response.body)
    }

    /// Send `action` and return the raw body, unparsed.
    pub fn send(&self, action: &str, params: Option<&Params>) -> Result<String, ApiError> {
        let request = self.build_request(action, params)?;
        debug!(
            action,
            fields = params.map_or(0, Params::len),
            "sending request"
        );
        let response = self.transport.execute(&request)?;
        debug!(action, status = response.status, bytes = response.body.len(), "received response");
        Ok(response.body)
    }

    /// Send `action` and decode the body into a `Response`.
    ///
    /// Fails with `ApiError::Remote` when the server reports `success: false`.
    pub fn call(&self, action: &str, params: Option<&Params>) -> Result<Response, ApiError> {
        let _span = info_span!("unu_call", action).entered();
        let body = self.send(action, params)?;
        decode_response(&body).inspect_err(|err| {
            if let ApiError::Remote { message } = err {
                warn!(action, message = %message, "server reported failure");
            }
        })
    }
}

/// Decode a response body and fail on `success: false`.
pub fn decode_response(body: &str) -> Result<Response, ApiError> {
    let response: Response =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    if !response.success {
        return Err(ApiError::Remote {
            message: response.error_message(),
        });
    }
    Ok(response)
}
