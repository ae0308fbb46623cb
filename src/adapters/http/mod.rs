//! HTTP surface: application state, routers, and the server loop.
//!
//! State is constructed once at startup and injected into every handler;
//! there are no ambient globals.

pub mod account;
pub mod auth;
pub mod billing;
pub mod cookies;
pub mod extract;
pub mod notice;
pub mod pages;
pub mod search;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{PaymentConfig, SessionConfig};
use crate::domain::billing::{EntitlementReconciler, WebhookVerifier};
use crate::domain::session::SessionSigner;
use crate::domain::user::AuthService;
use crate::ports::{CheckoutProvider, SearchUpstream, UserRepository};

/// Shared application state.
///
/// Cloned per request; all heavyweight members are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub auth: Arc<AuthService>,
    pub sessions: SessionSigner,
    pub checkout: Arc<dyn CheckoutProvider>,
    pub search: Arc<dyn SearchUpstream>,
    pub verifier: Arc<WebhookVerifier>,
    pub reconciler: Arc<EntitlementReconciler>,
    pub payment: Arc<PaymentConfig>,
}

impl AppState {
    /// Wire the state from ports and configuration.
    pub fn new(
        users: Arc<dyn UserRepository>,
        checkout: Arc<dyn CheckoutProvider>,
        search: Arc<dyn SearchUpstream>,
        session_config: &SessionConfig,
        payment_config: PaymentConfig,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(users.clone())),
            sessions: SessionSigner::new(session_config),
            verifier: Arc::new(WebhookVerifier::new(
                payment_config.stripe_webhook_secret.clone(),
            )),
            reconciler: Arc::new(EntitlementReconciler::new(users.clone())),
            payment: Arc::new(payment_config),
            users,
            checkout,
            search,
        }
    }
}

/// Assemble the route table.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(auth::routes())
        .merge(account::routes())
        .merge(billing::routes())
        .merge(search::routes())
        .with_state(state)
}

/// The full application: routes plus the middleware stack.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    router(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Serve until a shutdown signal arrives, then drain in-flight requests.
pub async fn serve(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining in-flight requests");
}
