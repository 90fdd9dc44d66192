// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! `RouterOS` API client module
//!
//! Wire codec, the sentence client with its login handshake, plain and TLS
//! dialing, the connection pool and the per-router metrics client.

mod client;
mod connection;
mod dial;
mod error;
mod pool;
pub mod proto;
mod types;

pub use client::MikroTikClient;
pub use connection::{Client, Reply, challenge_response};
pub use dial::{DeviceClient, DeviceStream, connect};
pub use error::RouterOsError;
pub use pool::ConnectionPool;
pub use proto::{Sentence, encode_length};
pub use types::{
    DhcpLeaseCount, HealthReading, InterfaceStats, RouteCount, RouterMetrics, SystemResource,
};
