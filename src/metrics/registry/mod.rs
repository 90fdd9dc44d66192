// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and update logic

mod cleanup;
mod init;
mod scrape;
mod update;

use crate::metrics::labels::{
    DhcpLabels, HealthLabels, InterfaceLabels, RouteLabels, RouterLabels, SystemInfoLabels,
};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::sync::Mutex;

#[derive(Clone, Copy)]
struct InterfaceSnapshot {
    rx_bytes: u64,
    tx_bytes: u64,
    rx_packets: u64,
    tx_packets: u64,
    rx_errors: u64,
    tx_errors: u64,
}

/// Label sets written by the last scrape of each router
type LabelsByRouter<L> = Arc<Mutex<HashMap<String, HashSet<L>>>>;

#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Arc<Mutex<Registry>>,
    // counters (delta-applied)
    interface_rx_bytes: Family<InterfaceLabels, Counter>,
    interface_tx_bytes: Family<InterfaceLabels, Counter>,
    interface_rx_packets: Family<InterfaceLabels, Counter>,
    interface_tx_packets: Family<InterfaceLabels, Counter>,
    interface_rx_errors: Family<InterfaceLabels, Counter>,
    interface_tx_errors: Family<InterfaceLabels, Counter>,
    // gauges
    interface_running: Family<InterfaceLabels, Gauge>,
    system_cpu_load: Family<RouterLabels, Gauge>,
    system_free_memory: Family<RouterLabels, Gauge>,
    system_total_memory: Family<RouterLabels, Gauge>,
    system_info: Family<SystemInfoLabels, Gauge>,
    system_uptime_seconds: Family<RouterLabels, Gauge>,
    health_value: Family<HealthLabels, Gauge<f64, AtomicU64>>,
    dhcp_leases: Family<DhcpLabels, Gauge>,
    routes_active: Family<RouteLabels, Gauge>,
    // scrape status counters
    scrape_success: Family<RouterLabels, Counter>,
    scrape_errors: Family<RouterLabels, Counter>,
    // scrape timing metrics
    scrape_duration_milliseconds: Family<RouterLabels, Gauge>,
    scrape_last_success_timestamp_seconds: Family<RouterLabels, Gauge>,
    connection_consecutive_errors: Family<RouterLabels, Gauge>,
    collection_cycle_duration_milliseconds: Gauge,
    // connection pool metrics
    connection_pool_size: Gauge,
    connection_pool_active: Gauge,
    prev_iface: Arc<Mutex<HashMap<InterfaceLabels, InterfaceSnapshot>>>,
    prev_system_info: Arc<Mutex<HashMap<String, SystemInfoLabels>>>,
    prev_health: LabelsByRouter<HealthLabels>,
    prev_dhcp: LabelsByRouter<DhcpLabels>,
    prev_routes: LabelsByRouter<RouteLabels>,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
