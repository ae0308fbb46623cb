//! Route table for the search area.

use axum::routing::get;
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{search_get, search_post};

/// Search routes.
///
/// - `GET/POST /search` (requires a session and the premium entitlement)
pub fn routes() -> Router<AppState> {
    Router::new().route("/search", get(search_get).post(search_post))
}
