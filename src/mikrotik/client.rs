// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! High-level per-router metrics client

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use super::dial::DeviceClient;
use super::error::RouterOsError;
use super::pool::ConnectionPool;
use super::types::RouterMetrics;
use crate::collectors::Collector;
use crate::config::RouterConfig;
use crate::error::{AppError, Result};

/// `RouterOS` metrics client for one configured router
///
/// Borrows a logged-in connection from the shared pool, runs every enabled
/// collector on it, and hands it back.
pub struct MikroTikClient {
    config: RouterConfig,
    pool: Arc<ConnectionPool>,
    connect_timeout: Duration,
    command_timeout: Duration,
}

impl MikroTikClient {
    /// Creates a new client with a shared connection pool and default timeouts
    #[must_use]
    pub fn with_pool(config: RouterConfig, pool: Arc<ConnectionPool>) -> Self {
        Self {
            config,
            pool,
            connect_timeout: Duration::from_secs(crate::config::defaults::CONNECT_TIMEOUT_SECS),
            command_timeout: Duration::from_secs(crate::config::defaults::COMMAND_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, command: Duration) -> Self {
        self.connect_timeout = connect;
        self.command_timeout = command;
        self
    }

    /// Collects metrics from the router
    ///
    /// A `!trap` answer to one collector marks it as skipped and leaves its
    /// section empty. Any other failure aborts the scrape and the connection
    /// is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if connecting, logging in or a collector command fails.
    pub async fn collect_metrics(&self) -> Result<RouterMetrics> {
        let mut conn = self
            .pool
            .get_connection(&self.config, self.connect_timeout)
            .await?;

        let result = self.collect_with(&mut conn).await;

        if result.is_ok() {
            self.pool.record_success(&self.config).await;
        } else {
            self.pool.record_error(&self.config).await;
        }
        self.pool
            .release_connection(&self.config, conn, result.is_ok())
            .await;

        result
    }

    async fn collect_with(&self, conn: &mut DeviceClient) -> Result<RouterMetrics> {
        let mut metrics = RouterMetrics::new(self.config.name.clone());

        for collector in self.config.enabled_collectors() {
            let command = collector.command();
            tracing::trace!("Router '{}': running {:?}", self.config.name, command);

            let reply = match timeout(self.command_timeout, conn.run(command)).await {
                Err(_) => {
                    return Err(AppError::Timeout {
                        router: self.config.name.clone(),
                        phase: collector.name(),
                        after: self.command_timeout,
                    });
                }
                Ok(Ok(reply)) => reply,
                Ok(Err(RouterOsError::Trap { message, .. })) => {
                    tracing::warn!(
                        "Router '{}': collector {} rejected by device: {}",
                        self.config.name,
                        collector,
                        message
                    );
                    metrics.skipped.insert(collector);
                    continue;
                }
                Ok(Err(source)) => {
                    return Err(command_error(&self.config.name, collector, source));
                }
            };

            collector.apply(&reply, &mut metrics);
        }

        Ok(metrics)
    }
}

fn command_error(router: &str, collector: Collector, source: RouterOsError) -> AppError {
    AppError::Command {
        router: router.to_string(),
        command: collector.command()[0].to_string(),
        source,
    }
}
