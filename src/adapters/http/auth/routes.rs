//! Route table for the auth area.

use axum::routing::get;
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{login, login_form, logout, register, register_form};

/// Auth routes.
///
/// - `GET/POST /login`
/// - `GET/POST /register`
/// - `GET /logout` (requires a session)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", get(logout))
}
