//! Payloads for the search routes.

use serde::Deserialize;

/// Search input, from the query string (GET) or form body (POST).
#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_optional() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert!(params.query.is_none());

        let params: SearchParams = serde_json::from_str(r#"{"query":"widget"}"#).unwrap();
        assert_eq!(params.query.as_deref(), Some("widget"));
    }
}
