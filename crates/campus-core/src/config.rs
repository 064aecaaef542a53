// ── Portal configuration ──

use std::time::Duration;

use url::Url;

use campus_api::TransportConfig;

use crate::error::CoreError;

/// Configuration for a [`Portal`](crate::Portal) connection.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL of the administration server.
    pub server_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl PortalConfig {
    pub fn new(server_url: Url) -> Self {
        Self {
            server_url,
            timeout: Duration::from_secs(30),
        }
    }

    /// Parse a raw URL string into a config.
    pub fn from_url_str(raw: &str) -> Result<Self, CoreError> {
        let server_url = raw.parse().map_err(|e| CoreError::Config {
            message: format!("invalid server URL '{raw}': {e}"),
        })?;
        Ok(Self::new(server_url))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            ..TransportConfig::default()
        }
    }
}
