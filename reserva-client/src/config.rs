//! Client configuration

use std::path::PathBuf;

/// Client configuration for connecting to the reservation backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "http://localhost:5000/api/v1")
    pub base_url: String,

    /// Directory holding the persisted session token
    pub data_dir: PathBuf,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            data_dir: PathBuf::from("./.reserva"),
            timeout: 30,
        }
    }

    /// Read configuration from the environment
    pub fn from_env() -> Self {
        let base_url = std::env::var("RESERVA_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api/v1".into());
        let mut config = Self::new(base_url);
        if let Ok(dir) = std::env::var("RESERVA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(timeout) = std::env::var("RESERVA_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }
        config
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000/api/v1")
    }
}
