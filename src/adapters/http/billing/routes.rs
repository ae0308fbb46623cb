//! Route table for the billing area.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{checkout, checkout_success, premium, webhook};

/// Billing routes.
///
/// - `GET /premium` (requires a session)
/// - `POST /checkout` (requires a session)
/// - `GET /checkout/success` (public landing page)
/// - `POST /webhook` (no session; authenticated by signature over the raw
///   body, so it must never go behind the login redirect)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/premium", get(premium))
        .route("/checkout", post(checkout))
        .route("/checkout/success", get(checkout_success))
        .route("/webhook", post(webhook))
}
