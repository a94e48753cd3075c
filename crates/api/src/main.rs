//! Lensfolio API server

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lensfolio_api::auth::AuthClient;
use lensfolio_api::profiles::PgProfileStore;
use lensfolio_api::routes;
use lensfolio_api::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "lensfolio_api=debug,info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("loading configuration")?;

    let pool = lensfolio_shared::db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("connecting to database")?;

    let profiles = Arc::new(PgProfileStore::new(pool.clone()));
    let sessions = Arc::new(AuthClient::new(
        config.auth_url.clone(),
        config.auth_anon_key.clone(),
        config.session_cookie.clone(),
    ));

    let state = AppState::new(&config, pool, profiles, sessions);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("binding {}", config.bind_address))?;

    tracing::info!(
        address = %config.bind_address,
        base_domain = %config.base_domain,
        environment = ?config.environment,
        "lensfolio-api listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
