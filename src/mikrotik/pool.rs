// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Connection pool for managing RouterOS connections

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;

use super::dial::{self, DeviceClient};
use crate::config::RouterConfig;
use crate::error::{AppError, Result};

/// Connection pool for reusing `RouterOS` connections
pub struct ConnectionPool {
    connections: Mutex<HashMap<String, PooledConnection>>,
    connection_states: Mutex<HashMap<String, ConnectionState>>,
    checked_out: AtomicUsize,
    max_idle_time: Duration,
}

struct PooledConnection {
    connection: DeviceClient,
    last_used: tokio::time::Instant,
}

/// Tracks connection health and error state
#[derive(Clone)]
struct ConnectionState {
    consecutive_errors: u32,
    last_error_time: Option<tokio::time::Instant>,
    last_success_time: Option<tokio::time::Instant>,
}

impl ConnectionState {
    fn new() -> Self {
        Self {
            consecutive_errors: 0,
            last_error_time: None,
            last_success_time: None,
        }
    }

    fn record_success(&mut self) {
        self.consecutive_errors = 0;
        self.last_success_time = Some(tokio::time::Instant::now());
    }

    fn record_error(&mut self) {
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
        self.last_error_time = Some(tokio::time::Instant::now());
    }

    fn backoff_delay(&self) -> Duration {
        // Exponential backoff: 2^n seconds, max 5 minutes
        let base_delay = 2u64.pow(self.consecutive_errors.min(8));
        Duration::from_secs(base_delay.min(300))
    }

    fn should_skip_attempt(&self) -> bool {
        if self.consecutive_errors < 3 {
            return false;
        }

        if let Some(last_error) = self.last_error_time {
            last_error.elapsed() < self.backoff_delay()
        } else {
            false
        }
    }
}

/// Router names are unique, so each router gets its own slot and backoff
fn pool_key(router: &RouterConfig) -> String {
    router.name.clone()
}

impl Default for ConnectionPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionPool {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
            connection_states: Mutex::new(HashMap::new()),
            checked_out: AtomicUsize::new(0),
            max_idle_time: Duration::from_secs(300), // 5 minutes
        }
    }

    /// Get a logged-in connection, reusing an idle one when possible
    ///
    /// Routers with three or more consecutive failures are skipped until
    /// their backoff delay has passed. A failed dial or login counts as a
    /// failure; success is recorded by the caller once the scrape finished.
    pub(crate) async fn get_connection(
        &self,
        router: &RouterConfig,
        connect_timeout: Duration,
    ) -> Result<DeviceClient> {
        let key = pool_key(router);
        tracing::trace!("Requesting connection for key: {}", key);

        {
            let mut states = self.connection_states.lock().await;
            let state = states
                .entry(key.clone())
                .or_insert_with(ConnectionState::new);

            if state.should_skip_attempt() {
                tracing::debug!(
                    "Skipping connection attempt to {} (backoff: {} consecutive errors, delay: {:?})",
                    router.name,
                    state.consecutive_errors,
                    state.backoff_delay()
                );
                return Err(AppError::Backoff {
                    router: router.name.clone(),
                    errors: state.consecutive_errors,
                });
            }
        }

        let idle = {
            let mut pool = self.connections.lock().await;
            match pool.remove(&key) {
                Some(pooled) if pooled.last_used.elapsed() < self.max_idle_time => {
                    tracing::debug!("Reusing connection from pool for {}", router.name);
                    tracing::trace!("Connection last used: {:?} ago", pooled.last_used.elapsed());
                    Some(pooled.connection)
                }
                Some(mut expired) => {
                    tracing::debug!("Connection expired for {}, removing", router.name);
                    let _ = expired.connection.close().await;
                    None
                }
                None => None,
            }
        };

        let conn = match idle {
            Some(conn) => conn,
            None => match self.open(router, connect_timeout).await {
                Ok(conn) => conn,
                Err(e) => {
                    self.record_error(router).await;
                    return Err(e);
                }
            },
        };

        self.checked_out.fetch_add(1, Ordering::Relaxed);
        Ok(conn)
    }

    async fn open(&self, router: &RouterConfig, connect_timeout: Duration) -> Result<DeviceClient> {
        let address = router.socket_address();
        tracing::debug!("Creating new connection for {} at {}", router.name, address);

        let mut conn = dial::connect(&address, router.tls, connect_timeout)
            .await
            .map_err(|source| AppError::Dial {
                router: router.name.clone(),
                address: address.clone(),
                source,
            })?;

        tracing::trace!("Connection established, attempting login as {}", router.username);
        let login = timeout(connect_timeout, conn.login(&router.username, &router.password)).await;
        let result = match login {
            Ok(Ok(())) => {
                tracing::debug!("Login successful for {}", router.name);
                return Ok(conn);
            }
            Ok(Err(source)) => AppError::Login {
                router: router.name.clone(),
                source,
            },
            Err(_) => AppError::Timeout {
                router: router.name.clone(),
                phase: "login",
                after: connect_timeout,
            },
        };
        let _ = conn.close().await;
        Err(result)
    }

    /// Record successful operation
    pub(crate) async fn record_success(&self, router: &RouterConfig) {
        let mut states = self.connection_states.lock().await;
        let state = states
            .entry(pool_key(router))
            .or_insert_with(ConnectionState::new);
        state.record_success();
    }

    /// Record failed operation
    pub(crate) async fn record_error(&self, router: &RouterConfig) {
        let mut states = self.connection_states.lock().await;
        let state = states
            .entry(pool_key(router))
            .or_insert_with(ConnectionState::new);
        state.record_error();
        tracing::trace!(
            "Error recorded for {}, consecutive errors: {}",
            router.name,
            state.consecutive_errors
        );
    }

    /// Consecutive errors and whether the router ever succeeded
    pub async fn get_connection_state(&self, router: &RouterConfig) -> Option<(u32, bool)> {
        let states = self.connection_states.lock().await;
        states
            .get(&pool_key(router))
            .map(|state| (state.consecutive_errors, state.last_success_time.is_some()))
    }

    /// Total (idle plus checked out) and checked out connection counts
    pub async fn get_pool_stats(&self) -> (usize, usize) {
        let idle = self.connections.lock().await.len();
        let active = self.checked_out.load(Ordering::Relaxed);
        (idle + active, active)
    }

    /// Hand a connection back; broken connections are closed instead of pooled
    pub(crate) async fn release_connection(
        &self,
        router: &RouterConfig,
        mut conn: DeviceClient,
        reusable: bool,
    ) {
        self.checked_out.fetch_sub(1, Ordering::Relaxed);

        if !reusable || conn.is_closed() {
            tracing::debug!("Discarding connection for {}", router.name);
            let _ = conn.close().await;
            return;
        }

        tracing::debug!("Returning connection to pool for {}", router.name);
        let mut pool = self.connections.lock().await;
        pool.insert(
            pool_key(router),
            PooledConnection {
                connection: conn,
                last_used: tokio::time::Instant::now(),
            },
        );
    }

    /// Close and drop connections idle for longer than the limit
    pub async fn cleanup(&self) {
        let expired: Vec<(String, PooledConnection)> = {
            let mut pool = self.connections.lock().await;
            let keys: Vec<String> = pool
                .iter()
                .filter(|(_, pooled)| pooled.last_used.elapsed() >= self.max_idle_time)
                .map(|(key, _)| key.clone())
                .collect();
            keys.into_iter()
                .filter_map(|key| pool.remove(&key).map(|pooled| (key, pooled)))
                .collect()
        };

        for (key, mut pooled) in expired {
            tracing::debug!("Cleaning up expired connection: {}", key);
            let _ = pooled.connection.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(address: &str) -> RouterConfig {
        RouterConfig {
            name: "test".to_string(),
            address: address.to_string(),
            username: "admin".to_string(),
            password: String::new(),
            tls: false,
            collectors: None,
        }
    }

    #[test]
    fn test_connection_state_new() {
        let state = ConnectionState::new();
        assert_eq!(state.consecutive_errors, 0);
        assert!(state.last_error_time.is_none());
        assert!(state.last_success_time.is_none());
    }

    #[test]
    fn test_connection_state_record_success() {
        let mut state = ConnectionState::new();
        state.consecutive_errors = 5;

        state.record_success();

        assert_eq!(state.consecutive_errors, 0);
        assert!(state.last_success_time.is_some());
    }

    #[test]
    fn test_connection_state_backoff_delay() {
        let mut state = ConnectionState::new();
        assert_eq!(state.backoff_delay(), Duration::from_secs(1));

        state.record_error();
        assert_eq!(state.backoff_delay(), Duration::from_secs(2));

        for _ in 0..7 {
            state.record_error();
        }
        assert_eq!(state.consecutive_errors, 8);
        assert_eq!(state.backoff_delay(), Duration::from_secs(256));

        for _ in 0..10 {
            state.record_error();
        }
        assert_eq!(state.backoff_delay(), Duration::from_secs(256));
    }

    #[test]
    fn test_connection_state_should_skip_attempt() {
        let mut state = ConnectionState::new();
        assert!(!state.should_skip_attempt());

        state.record_error();
        state.record_error();
        assert!(!state.should_skip_attempt());

        state.record_error();
        assert!(state.should_skip_attempt());
    }

    #[tokio::test]
    async fn test_connection_pool_stats_empty() {
        let pool = ConnectionPool::new();
        assert_eq!(pool.get_pool_stats().await, (0, 0));
    }

    #[tokio::test]
    async fn test_record_error_then_success() {
        let pool = ConnectionPool::new();
        let r = router("192.168.1.1");
        pool.record_error(&r).await;
        pool.record_error(&r).await;
        assert_eq!(pool.get_connection_state(&r).await, Some((2, false)));

        pool.record_success(&r).await;
        assert_eq!(pool.get_connection_state(&r).await, Some((0, true)));
    }

    #[tokio::test]
    async fn test_backoff_skips_dial() {
        let pool = ConnectionPool::new();
        let r = router("192.0.2.1");
        for _ in 0..3 {
            pool.record_error(&r).await;
        }
        let err = pool
            .get_connection(&r, Duration::from_millis(10))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Backoff { errors: 3, .. }));
    }

    #[tokio::test]
    async fn test_dial_failure_is_recorded() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let pool = ConnectionPool::new();
        let r = router(&addr);
        let err = pool
            .get_connection(&r, Duration::from_secs(1))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Dial { .. }));
        assert_eq!(pool.get_connection_state(&r).await, Some((1, false)));
    }

    #[tokio::test]
    async fn test_routers_sharing_address_have_separate_state() {
        let pool = ConnectionPool::new();
        let first = router("192.0.2.1");
        let second = RouterConfig {
            name: "second".to_string(),
            ..router("192.0.2.1")
        };
        for _ in 0..3 {
            pool.record_error(&first).await;
        }
        pool.record_success(&second).await;

        assert_eq!(pool.get_connection_state(&first).await, Some((3, false)));
        assert_eq!(pool.get_connection_state(&second).await, Some((0, true)));
    }

    #[tokio::test]
    async fn test_cleanup_empty_pool() {
        let pool = ConnectionPool::new();
        pool.cleanup().await;
        assert_eq!(pool.get_pool_stats().await.0, 0);
    }
}
