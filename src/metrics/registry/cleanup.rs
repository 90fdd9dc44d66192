// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Removal of label sets that disappeared from a router

use crate::metrics::labels::InterfaceLabels;
use prometheus_client::metrics::family::Family;
use std::collections::HashSet;
use std::hash::Hash;

use super::{LabelsByRouter, MetricsRegistry};

impl MetricsRegistry {
    /// Drop interface snapshots and label sets of `router` not in `current`
    pub(crate) async fn cleanup_stale_interfaces(
        &self,
        router: &str,
        current: &HashSet<InterfaceLabels>,
    ) {
        let stale: Vec<InterfaceLabels> = {
            let mut prev = self.prev_iface.lock().await;
            let stale: Vec<_> = prev
                .keys()
                .filter(|labels| labels.router == router && !current.contains(*labels))
                .cloned()
                .collect();
            for labels in &stale {
                prev.remove(labels);
            }
            stale
        };

        for labels in &stale {
            self.interface_rx_bytes.remove(labels);
            self.interface_tx_bytes.remove(labels);
            self.interface_rx_packets.remove(labels);
            self.interface_tx_packets.remove(labels);
            self.interface_rx_errors.remove(labels);
            self.interface_tx_errors.remove(labels);
            self.interface_running.remove(labels);
        }
        if !stale.is_empty() {
            tracing::debug!(
                "Removed {} stale interface label sets for {}",
                stale.len(),
                router
            );
        }
    }

    /// Replace the remembered label sets of `router` with `current`,
    /// removing the ones that are gone from `family`
    pub(super) async fn retain_labels<L, M>(
        &self,
        prev: &LabelsByRouter<L>,
        family: &Family<L, M>,
        router: &str,
        current: HashSet<L>,
    ) where
        L: Clone + Hash + Eq,
    {
        let mut prev = prev.lock().await;
        if let Some(old) = prev.get(router) {
            let mut removed = 0usize;
            for stale in old.difference(&current) {
                family.remove(stale);
                removed += 1;
            }
            if removed > 0 {
                tracing::debug!("Removed {} stale label sets for {}", removed, router);
            }
        }
        prev.insert(router.to_string(), current);
    }
}
