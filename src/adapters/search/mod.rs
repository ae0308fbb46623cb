//! HTTP client for the listing search upstream.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::ports::{SearchError, SearchReply, SearchUpstream};

/// Forwards search queries to the upstream listing API.
pub struct HttpSearchUpstream {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpSearchUpstream {
    /// Build a client from search configuration.
    ///
    /// The timeout is mandatory: the gated search handler runs inside a
    /// request cycle and must never block indefinitely on the upstream.
    pub fn new(config: &SearchConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("reqwest client construction only fails on TLS backend misconfiguration");

        Self {
            base_url: config.upstream_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }
}

#[async_trait]
impl SearchUpstream for HttpSearchUpstream {
    async fn search(&self, query: &str) -> Result<SearchReply, SearchError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    SearchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "search upstream returned an error");
            return Err(SearchError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let items: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        Ok(SearchReply { items })
    }
}
