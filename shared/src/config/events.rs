//! Live booking feed configuration

use serde::{Deserialize, Serialize};

/// Settings for the server-sent booking event stream
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsConfig {
    /// Seconds between keep-alive comments on an idle stream (0 disables them)
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,

    /// Advertised client reconnect delay in milliseconds (`retry:` field)
    #[serde(default = "default_retry_ms")]
    pub retry_ms: u64,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            keep_alive_secs: default_keep_alive_secs(),
            retry_ms: default_retry_ms(),
        }
    }
}

impl EventsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            keep_alive_secs: std::env::var("EVENTS_KEEP_ALIVE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.keep_alive_secs),
            retry_ms: std::env::var("EVENTS_RETRY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retry_ms),
        }
    }

    /// Keep-alive interval, `None` when disabled
    pub fn keep_alive(&self) -> Option<std::time::Duration> {
        (self.keep_alive_secs > 0).then(|| std::time::Duration::from_secs(self.keep_alive_secs))
    }
}

fn default_keep_alive_secs() -> u64 {
    15
}

fn default_retry_ms() -> u64 {
    3000
}
