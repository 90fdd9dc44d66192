// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # RouterOS Exporter
//!
//! Prometheus exporter for MikroTik RouterOS devices.
//!
//! Talks to routers over the RouterOS API (plain TCP or TLS), runs a fixed
//! set of collectors on every device, and exposes the results in
//! OpenMetrics format.
//!
//! ## Main modules
//! - `api`: HTTP API handlers
//! - `collector`: periodic collection loop
//! - `collectors`: per-subsystem queries and their parsers
//! - `config`: configuration management
//! - `error`: error types
//! - `metrics`: metrics parsing and registry
//! - `mikrotik`: RouterOS wire protocol, client and connection pool
//! - `prelude`: commonly used types and traits

mod api;
mod collector;
mod collectors;
mod config;
mod error;
mod metrics;
pub mod mikrotik;
pub mod prelude;

/// Application configuration
pub use config::{Config, RouterConfig, parse_routers, validate_routers};

/// Application error and result type
pub use error::{AppError, Result};

/// HTTP API router and state
pub use api::handlers::{HealthResponse, OPENMETRICS_CONTENT_TYPE, RouterHealth};
pub use api::{AppState, create_router};

/// Metrics collection loop
pub use collector::start_collection_loop;

/// Collector table
pub use collectors::Collector;

/// Metrics registry and labels
pub use metrics::{MetricsRegistry, RouterLabels};

/// Connection pool, metrics client and metric input types
pub use mikrotik::{
    ConnectionPool, DhcpLeaseCount, HealthReading, InterfaceStats, MikroTikClient, RouteCount,
    RouterMetrics, SystemResource,
};
