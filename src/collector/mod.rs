// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics collection orchestration
//!
//! Every interval spawns one task per configured router, waits for all of
//! them, then records pool and cycle statistics.

mod cleanup;
mod router_task;

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::metrics::{MetricsRegistry, RouterLabels};
use crate::mikrotik::ConnectionPool;

/// Starts the background metrics collection loop
///
/// Also starts the connection pool cleanup task, which is joined when the
/// loop stops.
pub fn start_collection_loop(
    mut shutdown_rx: watch::Receiver<bool>,
    config: Arc<Config>,
    metrics: MetricsRegistry,
    pool: Arc<ConnectionPool>,
) -> JoinHandle<()> {
    let interval = config.collection_interval_secs;
    tracing::info!("Starting background collection loop every {}s", interval);

    for router in &config.routers {
        metrics.initialize_router_metrics(&RouterLabels {
            router: router.name.clone(),
        });
    }

    let cleanup_handle = cleanup::start_pool_cleanup_task(pool.clone(), shutdown_rx.clone());

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval));

        loop {
            tokio::select! {
                _ = ticker.tick() => {},
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        tracing::info!("Stopping collection loop");
                        break;
                    }
                }
            }

            let cycle_start = std::time::Instant::now();

            let tasks: Vec<_> = config
                .routers
                .iter()
                .map(|router| {
                    router_task::spawn_router_collection(
                        router.clone(),
                        &config,
                        pool.clone(),
                        metrics.clone(),
                    )
                })
                .collect();

            for result in join_all(tasks).await {
                if let Err(e) = result {
                    tracing::error!("Router collection task failed: {}", e);
                }
            }

            let (total, active) = pool.get_pool_stats().await;
            metrics.update_pool_stats(total, active);
            metrics.record_collection_cycle_duration(cycle_start.elapsed().as_secs_f64());
        }

        let _ = cleanup_handle.await;
    })
}
