// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod health;
mod metrics;

pub use health::{HealthResponse, RouterHealth, health_check};
pub use metrics::{OPENMETRICS_CONTENT_TYPE, metrics_handler};
