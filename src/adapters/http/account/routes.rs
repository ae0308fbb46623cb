//! Route table for the account area.

use axum::routing::get;
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{dashboard, health, home, settings, settings_form};

/// Account routes.
///
/// - `GET /` (requires a session, redirects to the dashboard)
/// - `GET /dashboard` (requires a session)
/// - `GET/POST /settings` (requires a session)
/// - `GET /health` (public liveness probe)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/dashboard", get(dashboard))
        .route("/settings", get(settings_form).post(settings))
        .route("/health", get(health))
}
