// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Type definitions for MikroTik metrics

use std::collections::HashSet;

use crate::collectors::Collector;

/// Statistics for a network interface
#[derive(Debug, Clone)]
pub struct InterfaceStats {
    pub name: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_packets: u64,
    pub tx_packets: u64,
    pub rx_errors: u64,
    pub tx_errors: u64,
    pub running: bool,
}

/// System resource information from a `MikroTik` router
#[derive(Debug, Clone)]
pub struct SystemResource {
    pub uptime: String,
    pub cpu_load: u64,
    pub free_memory: u64,
    pub total_memory: u64,
    pub version: String,
    pub board_name: String,
}

/// One hardware sensor value from `/system/health`
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReading {
    pub name: String,
    pub value: f64,
}

/// Number of DHCP leases of one server in one status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpLeaseCount {
    pub server: String,
    pub status: String,
    pub count: u64,
}

/// Number of active routes installed by one protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCount {
    pub protocol: String,
    pub count: u64,
}

/// Complete metrics snapshot from a router
///
/// Sections whose collector is disabled stay empty. Collectors the device
/// rejected are listed in `skipped`; their sections carry no information.
#[derive(Debug, Clone, Default)]
pub struct RouterMetrics {
    pub router_name: String,
    pub system: Option<SystemResource>,
    pub interfaces: Vec<InterfaceStats>,
    pub health: Vec<HealthReading>,
    pub dhcp_leases: Vec<DhcpLeaseCount>,
    pub routes: Vec<RouteCount>,
    pub skipped: HashSet<Collector>,
}

impl RouterMetrics {
    #[must_use]
    pub fn new(router_name: impl Into<String>) -> Self {
        Self {
            router_name: router_name.into(),
            ..Self::default()
        }
    }

    /// Whether the section of `collector` reflects the device's answer
    #[must_use]
    pub fn answered(&self, collector: Collector) -> bool {
        !self.skipped.contains(&collector)
    }
}
