// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Error types for RouterOS Exporter application

use std::time::Duration;

use thiserror::Error;

use crate::mikrotik::RouterOsError;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// TCP/TLS connection to a router could not be opened
    #[error("Failed to connect to router '{router}' at {address}: {source}")]
    Dial {
        router: String,
        address: String,
        source: std::io::Error,
    },

    /// Router rejected the login or broke the handshake
    #[error("Login to router '{router}' failed: {source}")]
    Login {
        router: String,
        source: RouterOsError,
    },

    /// A collector command failed
    #[error("Command {command} on router '{router}' failed: {source}")]
    Command {
        router: String,
        command: String,
        source: RouterOsError,
    },

    /// Router did not answer in time
    #[error("Router '{router}' did not finish {phase} within {after:?}")]
    Timeout {
        router: String,
        phase: &'static str,
        after: Duration,
    },

    /// Router is skipped while backing off after repeated failures
    #[error("Connection to router '{router}' temporarily disabled due to {errors} consecutive errors")]
    Backoff { router: String, errors: u32 },

    /// RouterOS API error outside a named phase
    #[error("RouterOS error: {0}")]
    RouterOs(#[from] RouterOsError),

    /// Metrics encoding error
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;
