//! Endpoint configuration.
//!
//! A `ClientConfig` is fixed once the client is built. It derives
//! `Deserialize` so a host can embed it in its own config file; this crate
//! never reads files or environment variables itself.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the RPC endpoint, e.g. `https://unu.im/api`.
    pub url: String,
    /// Shared secret sent as `api_key` on every request.
    pub token: String,
    /// Upper bound for one whole call in seconds. `None` or `0` leaves the
    /// request unbounded.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new(url: &str, token: &str) -> Self {
        Self {
            url: url.to_string(),
            token: token.to_string(),
            timeout_secs: None,
            user_agent: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some((timeout.as_secs_f64().ceil() as u64).max(1));
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// Zero means no timeout, same as `None`.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

// The token must never end up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
