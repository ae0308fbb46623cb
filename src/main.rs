//! Service entry point: configuration, tracing, database pool, state
//! wiring, and the HTTP server with graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use search_cockpit::adapters::http::{app, serve, AppState};
use search_cockpit::adapters::postgres::PostgresUserRepository;
use search_cockpit::adapters::search::HttpSearchUpstream;
use search_cockpit::adapters::stripe::StripeCheckoutClient;
use search_cockpit::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    if config.payment.is_test_mode() && config.is_production() {
        tracing::warn!("running in production with a Stripe test key");
    }

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let state = AppState::new(
        Arc::new(PostgresUserRepository::new(pool)),
        Arc::new(StripeCheckoutClient::new(&config.payment)),
        Arc::new(HttpSearchUpstream::new(&config.search)),
        &config.session,
        config.payment.clone(),
    );

    let router = app(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    serve(router, config.server.socket_addr()).await?;

    tracing::info!("server drained and stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
