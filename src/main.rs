// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use std::net::SocketAddr;
use std::sync::Arc;

use routeros_exporter::{
    AppState, Config, ConnectionPool, MetricsRegistry, Result, create_router,
    start_collection_loop,
};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may carry RUST_LOG
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = Config::from_env().inspect_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
    })?;

    tracing::info!(
        "Loaded configuration for {} router(s)",
        config.routers.len()
    );
    for router in &config.routers {
        tracing::info!(
            "  - Router '{}' at {}{} ({} collectors)",
            router.name,
            router.socket_address(),
            if router.tls { " (tls)" } else { "" },
            router.enabled_collectors().len()
        );
    }

    let metrics = MetricsRegistry::new();
    let pool = Arc::new(ConnectionPool::new());

    let state = Arc::new(AppState {
        config: config.clone(),
        metrics: metrics.clone(),
        pool: pool.clone(),
    });

    // Graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    let collection = start_collection_loop(
        shutdown_rx.clone(),
        Arc::new(config.clone()),
        metrics,
        pool,
    );

    let app = create_router(state);

    let addr: SocketAddr = config.server_addr.parse().inspect_err(|e| {
        tracing::error!("Invalid server address: {}", e);
    })?;

    let listener = tokio::net::TcpListener::bind(addr).await.inspect_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
    })?;

    tracing::info!("RouterOS Exporter starting on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /health  - Health check");
    tracing::info!("  - GET /metrics - Prometheus metrics");

    let mut server_shutdown = shutdown_rx.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = server_shutdown.changed().await;
            tracing::info!("HTTP server shutting down");
        })
        .await
        .inspect_err(|e| {
            tracing::error!("Server error: {}", e);
        })?;

    let _ = collection.await;
    Ok(())
}

fn setup_tracing() {
    // RUST_LOG wins; default to info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
