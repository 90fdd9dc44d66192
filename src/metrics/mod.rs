// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and update module for RouterOS Exporter
//!
//! Contains types for labels, parsers, and Prometheus metrics registry.

mod labels;
mod parsers;
mod registry;


/// Labels for every exported metric family
pub use labels::{
    DhcpLabels, HealthLabels, InterfaceLabels, RouteLabels, RouterLabels, SystemInfoLabels,
};

/// Prometheus metrics registry
pub use registry::MetricsRegistry;
