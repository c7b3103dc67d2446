//! Connection settings for the history client.

use std::time::Duration;

/// Where and how to reach the history server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Whole-request timeout: connect, send and read the body.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: crate::DEFAULT_HOST.to_string(),
            port: crate::DEFAULT_HISTORY_PORT,
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("pricechart/{}", crate::VERSION),
        }
    }
}

impl ClientConfig {
    /// Configuration for `host:port` with default timeout and user agent.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `http://host:port`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
