//! Handlers for the premium-gated search proxy.

use axum::extract::{Form, Query, State};
use axum::response::{IntoResponse, Redirect, Response};

use crate::adapters::http::extract::CurrentUser;
use crate::adapters::http::notice::Notice;
use crate::adapters::http::pages;
use crate::adapters::http::AppState;
use crate::domain::user::User;

use super::dto::SearchParams;

/// GET /search
pub async fn search_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<SearchParams>,
) -> Response {
    run_search(state, user, params.query).await
}

/// POST /search
pub async fn search_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(params): Form<SearchParams>,
) -> Response {
    run_search(state, user, params.query).await
}

/// The entitlement gate plus the proxied call.
///
/// The flag is read from the account row loaded for this request, so a
/// grant that landed a moment ago is honored immediately. Upstream
/// failures degrade to an empty result set with a message; they are never
/// propagated as a raw fault.
async fn run_search(state: AppState, user: User, query: Option<String>) -> Response {
    if !user.is_premium {
        return Redirect::to(&Notice::PremiumRequired.redirect_to("/dashboard")).into_response();
    }

    let query = query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());
    let Some(query) = query else {
        return Redirect::to(&Notice::MissingQuery.redirect_to("/dashboard")).into_response();
    };

    match state.search.search(&query).await {
        Ok(reply) => pages::search_results_page(&query, &reply.items, None).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "search upstream failed");
            pages::search_results_page(&query, &[], Some(&e.to_string())).into_response()
        }
    }
}
