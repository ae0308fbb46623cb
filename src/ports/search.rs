//! Listing search upstream port.

use async_trait::async_trait;
use thiserror::Error;

/// Results from the search upstream.
///
/// Items are passed through as received; this service does not interpret
/// the upstream's listing schema.
#[derive(Debug, Clone, Default)]
pub struct SearchReply {
    pub items: Vec<serde_json::Value>,
}

/// Errors from the search upstream.
///
/// Every variant degrades to an empty result set plus a message for the
/// caller; none propagates as a raw fault.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The upstream did not answer within the configured deadline.
    #[error("Search upstream timed out")]
    Timeout,

    /// The upstream answered with a non-success status.
    #[error("Search upstream returned {status}")]
    UpstreamStatus { status: u16 },

    /// The upstream could not be reached.
    #[error("Search upstream unreachable: {0}")]
    Network(String),

    /// The upstream answered with something unparseable.
    #[error("Unexpected search upstream response: {0}")]
    InvalidResponse(String),
}

/// Port for the proxied search feature.
#[async_trait]
pub trait SearchUpstream: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchReply, SearchError>;
}
