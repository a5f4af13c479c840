use std::net::SocketAddr;
use std::sync::Arc;

use sagashelf_api::config::ServerConfig;
use sagashelf_api::router::build_app_router;
use sagashelf_api::state::AppState;
use sagashelf_sgdb::SgdbClient;
use sagashelf_store::RecordStoreClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sagashelf_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    if config.sgdb.api_key.trim().is_empty() {
        tracing::warn!("SGDB_KEY is not set; cover search will answer 503");
    }

    // --- HTTP clients (one shared connection pool) ---
    let http = reqwest::Client::new();

    let sgdb = SgdbClient::with_client(http.clone(), config.sgdb.clone())
        .expect("Invalid SGDB_BASE_URL");
    tracing::info!(base_url = %config.sgdb.base_url, "SteamGridDB client ready");

    let store = match &config.record_store {
        Some(store_config) => {
            tracing::info!(base_url = %store_config.base_url, "Record store client ready");
            Some(RecordStoreClient::with_client(http, store_config.clone()))
        }
        None => {
            tracing::warn!("RECORD_STORE_URL is not set; saga and game endpoints will answer 503");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        sgdb,
        store,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
