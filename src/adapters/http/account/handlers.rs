//! Handlers for the dashboard, settings, and liveness routes.

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;

use crate::adapters::http::extract::CurrentUser;
use crate::adapters::http::notice::{message_for, Notice, NoticeParams};
use crate::adapters::http::pages;
use crate::adapters::http::AppState;
use crate::domain::user::AuthError;

use super::dto::SettingsForm;

/// GET /
pub async fn home(_user: CurrentUser) -> Redirect {
    Redirect::to("/dashboard")
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "alive": true }))
}

/// GET /dashboard
pub async fn dashboard(
    CurrentUser(user): CurrentUser,
    Query(params): Query<NoticeParams>,
) -> Html<String> {
    pages::dashboard_page(&user, message_for(params.notice.as_deref()))
}

/// GET /settings
pub async fn settings_form(
    CurrentUser(user): CurrentUser,
    Query(params): Query<NoticeParams>,
) -> Html<String> {
    pages::settings_page(&user, message_for(params.notice.as_deref()))
}

/// POST /settings
///
/// The page submits either an email change or a password change, never
/// both. An empty submit just lands back on the page.
pub async fn settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<SettingsForm>,
) -> Response {
    if let Some(email) = form.email.filter(|e| !e.trim().is_empty()) {
        return match state.auth.change_email(user.id, email.trim()).await {
            Ok(()) => Redirect::to(&Notice::EmailUpdated.redirect_to("/settings")).into_response(),
            Err(AuthError::DuplicateEmail) => {
                Redirect::to(&Notice::DuplicateEmail.redirect_to("/settings")).into_response()
            }
            Err(e) => server_error(e),
        };
    }

    if let Some(password) = form.password.filter(|p| !p.is_empty()) {
        return match state.auth.change_password(user.id, &password).await {
            Ok(()) => {
                Redirect::to(&Notice::PasswordUpdated.redirect_to("/settings")).into_response()
            }
            Err(e) => server_error(e),
        };
    }

    Redirect::to("/settings").into_response()
}

fn server_error(e: AuthError) -> Response {
    tracing::error!(error = %e, "settings update failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("<p>Something went wrong. Please try again.</p>".to_string()),
    )
        .into_response()
}
