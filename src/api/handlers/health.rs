// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;
use crate::metrics::RouterLabels;

/// Health check endpoint response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub routers: Vec<RouterHealth>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouterHealth {
    pub name: String,
    /// `unknown`, `healthy`, `failing` or `degraded`
    pub status: String,
    pub has_successful_scrape: bool,
}

fn router_status(successes: u64, errors: u64, consecutive_errors: u32) -> &'static str {
    match (successes, errors) {
        (0, 0) => "unknown",
        (0, _) => "degraded",
        _ if consecutive_errors > 0 => "failing",
        _ => "healthy",
    }
}

/// GET /health
///
/// Returns 503 with status `degraded` while any router has failed every
/// scrape so far.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut routers = Vec::with_capacity(state.config.routers.len());
    let mut degraded = false;

    for router in &state.config.routers {
        let labels = RouterLabels {
            router: router.name.clone(),
        };
        let successes = state.metrics.get_scrape_success_count(&labels);
        let errors = state.metrics.get_scrape_error_count(&labels);
        let consecutive_errors = state
            .pool
            .get_connection_state(router)
            .await
            .map_or(0, |(errors, _)| errors);

        let status = router_status(successes, errors, consecutive_errors);
        degraded |= status == "degraded";
        routers.push(RouterHealth {
            name: router.name.clone(),
            status: status.to_string(),
            has_successful_scrape: successes > 0,
        });
    }

    let (code, status) = if degraded {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    } else {
        (StatusCode::OK, "healthy")
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        routers,
    };

    (code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_status() {
        assert_eq!(router_status(0, 0, 0), "unknown");
        assert_eq!(router_status(0, 3, 3), "degraded");
        assert_eq!(router_status(5, 1, 1), "failing");
        assert_eq!(router_status(5, 1, 0), "healthy");
    }
}
