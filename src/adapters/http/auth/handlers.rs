//! Handlers for registration, login, and logout.

use axum::extract::{Form, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::adapters::http::cookies::{clear_session_cookie, session_cookie};
use crate::adapters::http::extract::CurrentUser;
use crate::adapters::http::notice::{message_for, Notice, NoticeParams};
use crate::adapters::http::pages;
use crate::adapters::http::AppState;
use crate::domain::user::AuthError;

use super::dto::{LoginForm, RegisterForm};

/// GET /login
pub async fn login_form(Query(params): Query<NoticeParams>) -> Html<String> {
    pages::login_page(message_for(params.notice.as_deref()))
}

/// POST /login
///
/// Success establishes the session cookie and lands on the dashboard.
/// Unknown email and wrong password share one failure notice.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.auth.login(&form.email, &form.password).await {
        Ok(user) => {
            let token = state.sessions.issue(user.id);
            let cookie = session_cookie(state.sessions.cookie_name(), &token);
            (
                [(header::SET_COOKIE, cookie)],
                Redirect::to(&Notice::LoginOk.redirect_to("/dashboard")),
            )
                .into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            Redirect::to(&Notice::InvalidCredentials.redirect_to("/login")).into_response()
        }
        Err(e) => server_error(e),
    }
}

/// GET /register
pub async fn register_form(Query(params): Query<NoticeParams>) -> Html<String> {
    pages::register_page(message_for(params.notice.as_deref()))
}

/// POST /register
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    match state.auth.register(&form.email, &form.password).await {
        Ok(_) => Redirect::to(&Notice::RegisterOk.redirect_to("/login")).into_response(),
        Err(AuthError::DuplicateEmail) => {
            Redirect::to(&Notice::DuplicateEmail.redirect_to("/register")).into_response()
        }
        Err(e) => server_error(e),
    }
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, _user: CurrentUser) -> Response {
    let cookie = clear_session_cookie(state.sessions.cookie_name());
    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&Notice::LoggedOut.redirect_to("/login")),
    )
        .into_response()
}

fn server_error(e: AuthError) -> Response {
    tracing::error!(error = %e, "auth operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("<p>Something went wrong. Please try again.</p>".to_string()),
    )
        .into_response()
}
