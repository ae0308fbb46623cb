//! Request extractors for authenticated pages.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::adapters::http::cookies::cookie_value;
use crate::adapters::http::notice::Notice;
use crate::adapters::http::AppState;
use crate::domain::user::User;

/// The authenticated account behind the current request.
///
/// The account row is re-read from the store on every extraction. The
/// session token carries identity only, never authorization state, so an
/// entitlement granted mid-session is visible on the next request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Rejection for pages requiring authentication.
#[derive(Debug)]
pub enum AuthRejection {
    /// No usable session: send the browser to the login entry point
    /// (human-facing pages never get a bare 401).
    LoginRedirect,

    /// The account store failed while resolving the session.
    StoreFailure,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::LoginRedirect => {
                Redirect::to(&Notice::LoginRequired.redirect_to("/login")).into_response()
            }
            AuthRejection::StoreFailure => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<p>Something went wrong. Please try again.</p>".to_string()),
            )
                .into_response(),
        }
    }
}

impl axum::extract::FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        state: &'life1 AppState,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = cookie_value(&parts.headers, state.sessions.cookie_name())
                .ok_or(AuthRejection::LoginRedirect)?;

            let user_id = state
                .sessions
                .verify(token)
                .map_err(|_| AuthRejection::LoginRedirect)?;

            let user = state
                .users
                .find_by_id(user_id)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "session lookup hit a store failure");
                    AuthRejection::StoreFailure
                })?
                // A signed session for a deleted row falls back to login.
                .ok_or(AuthRejection::LoginRedirect)?;

            Ok(CurrentUser(user))
        })
    }
}
