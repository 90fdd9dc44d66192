// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metric update logic for router snapshots

use crate::metrics::labels::{
    DhcpLabels, HealthLabels, InterfaceLabels, RouteLabels, RouterLabels, SystemInfoLabels,
};
use crate::metrics::parsers::parse_uptime_to_seconds;
use crate::collectors::Collector;
use crate::mikrotik::{InterfaceStats, RouterMetrics, SystemResource};
use std::collections::HashSet;

use super::{InterfaceSnapshot, MetricsRegistry};

impl From<&InterfaceStats> for InterfaceSnapshot {
    fn from(iface: &InterfaceStats) -> Self {
        Self {
            rx_bytes: iface.rx_bytes,
            tx_bytes: iface.tx_bytes,
            rx_packets: iface.rx_packets,
            tx_packets: iface.tx_packets,
            rx_errors: iface.rx_errors,
            tx_errors: iface.tx_errors,
        }
    }
}

#[allow(clippy::cast_possible_wrap)]
fn gauge_value(v: u64) -> i64 {
    v.min(i64::MAX as u64) as i64
}

impl MetricsRegistry {
    /// Update metrics from collected router data
    ///
    /// Interface counters are applied as deltas against the previous
    /// snapshot; a counter that went backwards (device reboot) contributes
    /// zero. Label sets of the router that are missing from this snapshot
    /// are removed, except in sections whose collector was skipped: those
    /// keep their series and previous readings untouched.
    ///
    /// Router names must be unique: they key the previous snapshots. The
    /// configuration layer rejects duplicates.
    pub async fn update_metrics(&self, metrics: &RouterMetrics) {
        let router = &metrics.router_name;

        if metrics.answered(Collector::Interface) {
            self.update_interfaces(router, &metrics.interfaces).await;
        }

        if let Some(system) = &metrics.system {
            self.update_system(router, system).await;
        }

        if metrics.answered(Collector::Health) {
            self.update_health(metrics).await;
        }
        if metrics.answered(Collector::Dhcp) {
            self.update_dhcp(metrics).await;
        }
        if metrics.answered(Collector::Route) {
            self.update_routes(metrics).await;
        }
    }

    async fn update_health(&self, metrics: &RouterMetrics) {
        let router = &metrics.router_name;
        let health: HashSet<HealthLabels> = metrics
            .health
            .iter()
            .map(|reading| {
                let labels = HealthLabels {
                    router: router.clone(),
                    sensor: reading.name.clone(),
                };
                self.health_value.get_or_create(&labels).set(reading.value);
                labels
            })
            .collect();
        self.retain_labels(&self.prev_health, &self.health_value, router, health)
            .await;
    }

    async fn update_dhcp(&self, metrics: &RouterMetrics) {
        let router = &metrics.router_name;
        let dhcp: HashSet<DhcpLabels> = metrics
            .dhcp_leases
            .iter()
            .map(|lease| {
                let labels = DhcpLabels {
                    router: router.clone(),
                    server: lease.server.clone(),
                    status: lease.status.clone(),
                };
                self.dhcp_leases
                    .get_or_create(&labels)
                    .set(gauge_value(lease.count));
                labels
            })
            .collect();
        self.retain_labels(&self.prev_dhcp, &self.dhcp_leases, router, dhcp)
            .await;
    }

    async fn update_routes(&self, metrics: &RouterMetrics) {
        let router = &metrics.router_name;
        let routes: HashSet<RouteLabels> = metrics
            .routes
            .iter()
            .map(|route| {
                let labels = RouteLabels {
                    router: router.clone(),
                    protocol: route.protocol.clone(),
                };
                self.routes_active
                    .get_or_create(&labels)
                    .set(gauge_value(route.count));
                labels
            })
            .collect();
        self.retain_labels(&self.prev_routes, &self.routes_active, router, routes)
            .await;
    }

    #[allow(clippy::similar_names)]
    async fn update_interfaces(&self, router: &str, interfaces: &[InterfaceStats]) {
        let mut current = HashSet::with_capacity(interfaces.len());
        {
            let mut prev = self.prev_iface.lock().await;
            for iface in interfaces {
                let labels = InterfaceLabels {
                    router: router.to_string(),
                    interface: iface.name.clone(),
                };
                let now = InterfaceSnapshot::from(iface);
                let before = prev.get(&labels).copied().unwrap_or(now);

                self.interface_rx_bytes
                    .get_or_create(&labels)
                    .inc_by(now.rx_bytes.saturating_sub(before.rx_bytes));
                self.interface_tx_bytes
                    .get_or_create(&labels)
                    .inc_by(now.tx_bytes.saturating_sub(before.tx_bytes));
                self.interface_rx_packets
                    .get_or_create(&labels)
                    .inc_by(now.rx_packets.saturating_sub(before.rx_packets));
                self.interface_tx_packets
                    .get_or_create(&labels)
                    .inc_by(now.tx_packets.saturating_sub(before.tx_packets));
                self.interface_rx_errors
                    .get_or_create(&labels)
                    .inc_by(now.rx_errors.saturating_sub(before.rx_errors));
                self.interface_tx_errors
                    .get_or_create(&labels)
                    .inc_by(now.tx_errors.saturating_sub(before.tx_errors));
                self.interface_running
                    .get_or_create(&labels)
                    .set(i64::from(iface.running));

                prev.insert(labels.clone(), now);
                current.insert(labels);
            }
        }
        self.cleanup_stale_interfaces(router, &current).await;
    }

    async fn update_system(&self, router: &str, system: &SystemResource) {
        let router_label = RouterLabels {
            router: router.to_string(),
        };
        self.system_cpu_load
            .get_or_create(&router_label)
            .set(gauge_value(system.cpu_load));
        self.system_free_memory
            .get_or_create(&router_label)
            .set(gauge_value(system.free_memory));
        self.system_total_memory
            .get_or_create(&router_label)
            .set(gauge_value(system.total_memory));
        self.system_uptime_seconds
            .get_or_create(&router_label)
            .set(gauge_value(parse_uptime_to_seconds(&system.uptime)));

        let info_labels = SystemInfoLabels {
            router: router.to_string(),
            version: system.version.clone(),
            board: system.board_name.clone(),
        };
        {
            let mut prev = self.prev_system_info.lock().await;
            if let Some(old) = prev.insert(router.to_string(), info_labels.clone()) {
                if old != info_labels {
                    self.system_info.remove(&old);
                }
            }
        }
        self.system_info.get_or_create(&info_labels).set(1);
    }
}
