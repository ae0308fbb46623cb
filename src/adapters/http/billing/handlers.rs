//! Handlers for checkout initiation and webhook reconciliation.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;

use crate::adapters::http::extract::CurrentUser;
use crate::adapters::http::pages;
use crate::adapters::http::AppState;
use crate::ports::CheckoutRequest;

/// GET /premium
pub async fn premium(State(state): State<AppState>, _user: CurrentUser) -> Html<String> {
    pages::premium_page(&state.payment.display_price, None)
}

/// POST /checkout
///
/// Opens a hosted checkout session for the authenticated account. The
/// customer email is always the account email so the completed-checkout
/// webhook can correlate the payment back to this user. Provider failures
/// are rendered on the premium page; nothing mutates locally.
pub async fn checkout(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> Response {
    let request = CheckoutRequest {
        customer_email: user.email,
        price_id: state.payment.premium_price_id.clone(),
        success_url: state.payment.success_url.clone(),
        cancel_url: state.payment.cancel_url.clone(),
    };

    match state.checkout.create_checkout_session(request).await {
        Ok(session) => Redirect::to(&session.url).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "checkout could not be started");
            pages::premium_page(&state.payment.display_price, Some(&e.to_string()))
                .into_response()
        }
    }
}

/// GET /checkout/success
///
/// Purely informational: entitlement is granted by the webhook, not by
/// landing here.
pub async fn checkout_success() -> Html<String> {
    pages::checkout_success_page()
}

/// POST /webhook
///
/// Signature verification runs first, over the raw body bytes. Only then is
/// the payload parsed and reconciled. Status codes drive provider retries:
/// 400 is terminal, 500 requests redelivery.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(signature) = headers.get("Stripe-Signature").and_then(|v| v.to_str().ok()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing Stripe-Signature header" })),
        )
            .into_response();
    };

    let event = match state.verifier.verify_and_parse(&body, signature) {
        Ok(event) => event,
        Err(e) => {
            return (e.status_code(), Json(json!({ "error": e.to_string() }))).into_response();
        }
    };

    match state.reconciler.apply(&event).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "success" }))).into_response(),
        Err(e) => {
            if e.is_retryable() {
                tracing::error!(event_id = %event.id, error = %e, "webhook reconciliation failed; provider will retry");
            }
            (e.status_code(), Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
