// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Per-router collection task

use crate::config::{Config, RouterConfig};
use crate::metrics::{MetricsRegistry, RouterLabels};
use crate::mikrotik::{ConnectionPool, MikroTikClient};
use std::sync::Arc;

pub(super) fn spawn_router_collection(
    router: RouterConfig,
    config: &Config,
    pool: Arc<ConnectionPool>,
    metrics: MetricsRegistry,
) -> tokio::task::JoinHandle<()> {
    let client = MikroTikClient::with_pool(router.clone(), pool.clone())
        .with_timeouts(config.connect_timeout(), config.command_timeout());

    tokio::spawn(async move {
        let router_label = RouterLabels {
            router: router.name.clone(),
        };

        tracing::trace!("Starting metrics collection for router: {}", router.name);
        let start = std::time::Instant::now();
        let result = client.collect_metrics().await;
        let duration = start.elapsed().as_secs_f64();

        match result {
            Ok(m) => {
                metrics.update_metrics(&m).await;
                metrics.record_scrape_success(&router_label);

                tracing::debug!(
                    "Collected metrics for router {} in {:.3}s",
                    router.name,
                    duration
                );
                tracing::trace!(
                    "Router {}: {} interfaces, {} sensors, {} lease groups, {} route groups",
                    router.name,
                    m.interfaces.len(),
                    m.health.len(),
                    m.dhcp_leases.len(),
                    m.routes.len()
                );
            }
            Err(e) => {
                metrics.record_scrape_error(&router_label);
                tracing::warn!(
                    "Failed to collect metrics for {} in {:.3}s: {}",
                    router.name,
                    duration,
                    e
                );
                tracing::trace!("Error details for {}: {:?}", router.name, e);
            }
        }
        metrics.record_scrape_duration(&router_label, duration);

        if let Some((errors, _)) = pool.get_connection_state(&router).await {
            metrics.update_connection_errors(&router_label, errors);
        }
    })
}
