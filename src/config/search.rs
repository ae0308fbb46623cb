//! Search upstream configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Search upstream configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the listing search API
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// Timeout for upstream search calls in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Get the upstream timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://") {
            return Err(ValidationError::InvalidSearchUpstreamUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidSearchTimeout);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            upstream_url: default_upstream_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_upstream_url() -> String {
    "https://ebay-agent-cockpit.onrender.com".to_string()
}

fn default_timeout() -> u64 {
    10
}
