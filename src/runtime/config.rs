//! Server configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the parrot server.
///
/// Defaults are compiled in; there is no configuration file and no
/// environment lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParrotConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// Body read timeout in seconds.
    pub body_read_timeout: u64,
}

impl Default for ParrotConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            max_body_size: 10 * 1024 * 1024, // 10MB
            body_read_timeout: 30,
        }
    }
}

impl ParrotConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the maximum request body size.
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the body read timeout as a duration.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.body_read_timeout)
    }
}
