use std::time::Duration;

use planit_core::constants::{DEFAULT_GOAL_SERVICE_URL, DEFAULT_REQUEST_TIMEOUT};

use crate::error::{GoalClientError, Result};

/// Where the Goal Service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for GoalClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GOAL_SERVICE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl GoalClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Reads `PLANIT_API_URL` and `PLANIT_REQUEST_TIMEOUT_MS`, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("PLANIT_API_URL") {
            config.base_url = base_url;
        }
        if let Ok(timeout_ms) = std::env::var("PLANIT_REQUEST_TIMEOUT_MS") {
            let timeout_ms: u64 = timeout_ms.trim().parse().map_err(|_| {
                GoalClientError::invalid_config(format!(
                    "PLANIT_REQUEST_TIMEOUT_MS must be a whole number of milliseconds, got {:?}",
                    timeout_ms
                ))
            })?;
            config.request_timeout = Duration::from_millis(timeout_ms);
        }
        Ok(config)
    }
}
