// Transport configuration for building the session's reqwest::Client.
//
// The Zenoss login hands back a session cookie, so every client built here
// carries a cookie jar. The per-request timeout is the only way to abort
// a page fetch that never answers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;

use crate::error::Error;

const USER_AGENT: &str = concat!("zenoss-api/", env!("CARGO_PKG_VERSION"));

/// HTTP client settings shared by login and RPC calls.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub cookie_jar: Option<Arc<Jar>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            cookie_jar: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// A fresh cookie jar is created when none was supplied.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let jar = self
            .cookie_jar
            .as_ref()
            .map_or_else(|| Arc::new(Jar::default()), Arc::clone);

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .cookie_provider(jar)
            .build()
            .map_err(Error::ClientBuild)
    }

    /// Use the given per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create a config with a fresh cookie jar the caller can inspect.
    pub fn with_cookie_jar(mut self) -> Self {
        self.cookie_jar = Some(Arc::new(Jar::default()));
        self
    }
}
