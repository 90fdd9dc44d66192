// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Connection pool cleanup task

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::mikrotik::ConnectionPool;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Closes expired idle connections every minute until shutdown
pub(super) fn start_pool_cleanup_task(
    pool: Arc<ConnectionPool>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut cleanup_ticker = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            tokio::select! {
                _ = cleanup_ticker.tick() => {
                    pool.cleanup().await;
                    let (total, active) = pool.get_pool_stats().await;
                    tracing::trace!("Pool after cleanup: {} total, {} active", total, active);
                },
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        tracing::debug!("Stopping connection pool cleanup");
                        break;
                    }
                }
            }
        }
    })
}
