//! # homedashd — homedash daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Open the home store on top of the persisted state
//! - Build the remote status client and service
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use homedash_adapter_http_axum::router;
use homedash_adapter_http_axum::state::AppState;
use homedash_adapter_http_client::ClientConfig;
use homedash_adapter_storage_sqlite_sqlx::{Config as DatabaseConfig, SqliteStateStorage};
use homedash_app::notification_bus::InProcessNotificationBus;
use homedash_app::services::home_store::HomeStore;
use homedash_app::services::persistence::HomePersistence;
use homedash_app::services::status_service::StatusService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Storage
    let db = DatabaseConfig::new(config.storage.database_url.as_str())
        .with_busy_timeout(config.storage_busy_timeout())
        .build()
        .await
        .context("failed to open database")?;
    let storage = SqliteStateStorage::new(db.pool().clone());

    // Notifications
    let notification_bus = Arc::new(InProcessNotificationBus::new(
        config.notifications.capacity,
    ));

    // Services
    let persistence = HomePersistence::with_key(storage, config.storage.entry_key.as_str());
    let home_store = HomeStore::open_with(persistence, Arc::clone(&notification_bus)).await;

    let client = ClientConfig::new(config.remote.base_url.as_str())
        .with_timeout(config.remote_timeout())
        .into_client()
        .context("failed to build status client")?;
    let status_service = StatusService::new(client);

    // HTTP
    let state = AppState::new(home_store, status_service, notification_bus);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        addr = %bind_addr,
        remote = %config.remote.base_url,
        "homedashd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("homedashd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
