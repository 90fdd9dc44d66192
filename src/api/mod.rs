// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! HTTP API module for RouterOS Exporter
//!
//! # Endpoints
//! - `GET /health`: per-router health summary
//! - `GET /metrics`: Prometheus metrics in OpenMetrics text format

pub mod handlers;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::config::Config;
use crate::metrics::MetricsRegistry;
use crate::mikrotik::ConnectionPool;

/// Application state shared with endpoints
pub struct AppState {
    pub config: Config,
    pub metrics: MetricsRegistry,
    pub pool: Arc<ConnectionPool>,
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
