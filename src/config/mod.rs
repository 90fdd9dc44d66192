// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for RouterOS Exporter application
//!
//! Loads and parses configuration from environment variables and JSON.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::collectors::Collector;
use crate::error::{AppError, Result};


/// Default configuration values
pub mod defaults {
    pub const SERVER_ADDR: &str = "0.0.0.0:9090";
    pub const ROUTEROS_USERNAME: &str = "admin";
    pub const ROUTEROS_PASSWORD: &str = "";
    pub const COLLECTION_INTERVAL_SECS: u64 = 30;
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;
    pub const COMMAND_TIMEOUT_SECS: u64 = 30;
    pub const API_PORT: u16 = 8728;
    pub const API_TLS_PORT: u16 = 8729;
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const SERVER_ADDR: &str = "SERVER_ADDR";
    pub const ROUTERS_CONFIG: &str = "ROUTERS_CONFIG";
    pub const ROUTEROS_ADDRESS: &str = "ROUTEROS_ADDRESS";
    pub const ROUTEROS_USERNAME: &str = "ROUTEROS_USERNAME";
    pub const ROUTEROS_PASSWORD: &str = "ROUTEROS_PASSWORD";
    pub const COLLECTION_INTERVAL_SECONDS: &str = "COLLECTION_INTERVAL_SECONDS";
    pub const CONNECT_TIMEOUT_SECONDS: &str = "CONNECT_TIMEOUT_SECONDS";
    pub const COMMAND_TIMEOUT_SECONDS: &str = "COMMAND_TIMEOUT_SECONDS";
}

/// Configuration for a single RouterOS device
#[derive(Clone, Deserialize)]
pub struct RouterConfig {
    pub name: String,
    /// `host` or `host:port`
    pub address: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Use the api-ssl service
    #[serde(default)]
    pub tls: bool,
    /// Collector names; all collectors when absent
    #[serde(default)]
    pub collectors: Option<Vec<String>>,
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tls", &self.tls)
            .field("collectors", &self.collectors)
            .finish()
    }
}

impl RouterConfig {
    /// Validates router configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Router name cannot be empty".to_string());
        }

        if self.address.trim().is_empty() {
            return Err(format!("Address cannot be empty for router '{}'", self.name));
        }

        if self.username.trim().is_empty() {
            return Err(format!(
                "Username cannot be empty for router '{}'",
                self.name
            ));
        }

        if let Some(names) = &self.collectors {
            for name in names {
                if Collector::from_name(name).is_none() {
                    return Err(format!(
                        "Unknown collector '{}' for router '{}'",
                        name, self.name
                    ));
                }
            }
        }

        Ok(())
    }

    /// Address with the default API port filled in
    #[must_use]
    pub fn socket_address(&self) -> String {
        let has_port = match self.address.rsplit_once(':') {
            // bare IPv6 addresses contain colons but no brackets
            Some((host, port)) => {
                port.parse::<u16>().is_ok() && (!host.contains(':') || host.ends_with(']'))
            }
            None => false,
        };
        if has_port {
            return self.address.clone();
        }
        let port = if self.tls {
            defaults::API_TLS_PORT
        } else {
            defaults::API_PORT
        };
        if self.address.contains(':') && !self.address.starts_with('[') {
            format!("[{}]:{port}", self.address)
        } else {
            format!("{}:{port}", self.address)
        }
    }

    /// Enabled collectors in scrape order
    #[must_use]
    pub fn enabled_collectors(&self) -> Vec<Collector> {
        match &self.collectors {
            None => Collector::ALL.to_vec(),
            Some(names) => Collector::ALL
                .into_iter()
                .filter(|c| names.iter().any(|n| n == c.name()))
                .collect(),
        }
    }
}

/// Application-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub routers: Vec<RouterConfig>,
    pub collection_interval_secs: u64,
    pub connect_timeout_secs: u64,
    pub command_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: defaults::SERVER_ADDR.to_string(),
            routers: vec![],
            collection_interval_secs: defaults::COLLECTION_INTERVAL_SECS,
            connect_timeout_secs: defaults::CONNECT_TIMEOUT_SECS,
            command_timeout_secs: defaults::COMMAND_TIMEOUT_SECS,
        }
    }
}

fn env_secs(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Parses the `ROUTERS_CONFIG` JSON array
///
/// # Errors
///
/// Returns [`AppError::Config`] for malformed JSON.
pub fn parse_routers(json: &str) -> Result<Vec<RouterConfig>> {
    serde_json::from_str(json)
        .map_err(|e| AppError::Config(format!("Failed to parse ROUTERS_CONFIG: {e}")))
}

/// Checks every router and that router names are unique
///
/// Router names key the per-router metric labels, so duplicates would mix
/// the counters of two devices.
///
/// # Errors
///
/// Returns [`AppError::Config`] describing the first invalid router.
pub fn validate_routers(routers: &[RouterConfig]) -> Result<()> {
    let mut seen = HashSet::new();
    for router in routers {
        router.validate().map_err(AppError::Config)?;
        if !seen.insert(router.name.as_str()) {
            return Err(AppError::Config(format!(
                "Duplicate router name '{}'",
                router.name
            )));
        }
    }
    Ok(())
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if `ROUTERS_CONFIG` is malformed or any
    /// router fails validation.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server_addr = std::env::var(env_vars::SERVER_ADDR)
            .unwrap_or_else(|_| defaults::SERVER_ADDR.to_string());

        // Load routers configuration from JSON
        let routers = if let Ok(config_json) = std::env::var(env_vars::ROUTERS_CONFIG) {
            parse_routers(&config_json)?
        } else {
            // Fallback: use legacy environment variables for single router
            let address = std::env::var(env_vars::ROUTEROS_ADDRESS).ok();
            let username = std::env::var(env_vars::ROUTEROS_USERNAME)
                .unwrap_or_else(|_| defaults::ROUTEROS_USERNAME.to_string());
            let password = std::env::var(env_vars::ROUTEROS_PASSWORD)
                .unwrap_or_else(|_| defaults::ROUTEROS_PASSWORD.to_string());

            if let Some(addr) = address {
                vec![RouterConfig {
                    name: "default".to_string(),
                    address: addr,
                    username,
                    password,
                    tls: false,
                    collectors: None,
                }]
            } else {
                tracing::warn!(
                    "No router configuration found. Service will start but /metrics will be empty."
                );
                vec![]
            }
        };

        validate_routers(&routers)?;

        Ok(Config {
            server_addr,
            routers,
            collection_interval_secs: env_secs(
                env_vars::COLLECTION_INTERVAL_SECONDS,
                defaults::COLLECTION_INTERVAL_SECS,
            ),
            connect_timeout_secs: env_secs(
                env_vars::CONNECT_TIMEOUT_SECONDS,
                defaults::CONNECT_TIMEOUT_SECS,
            ),
            command_timeout_secs: env_secs(
                env_vars::COMMAND_TIMEOUT_SECONDS,
                defaults::COMMAND_TIMEOUT_SECS,
            ),
        })
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}
