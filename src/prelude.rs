// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! ```rust
//! use routeros_exporter::prelude::*;
//! ```

// Core types
pub use crate::config::{Config, RouterConfig};
pub use crate::error::{AppError, Result};

// Metrics types
pub use crate::metrics::{
    DhcpLabels, HealthLabels, InterfaceLabels, MetricsRegistry, RouteLabels, RouterLabels,
    SystemInfoLabels,
};

// RouterOS client
pub use crate::collectors::Collector;
pub use crate::mikrotik::{
    Client, ConnectionPool, DeviceClient, MikroTikClient, Reply, RouterMetrics, RouterOsError,
    Sentence,
};
