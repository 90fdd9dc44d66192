// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! `/ip/dhcp-server/lease`

use std::collections::BTreeMap;

use crate::mikrotik::{DhcpLeaseCount, Sentence};

pub(super) const COMMAND: &[&str] = &["/ip/dhcp-server/lease/print", "=.proplist=server,status"];

/// Aggregate leases by server and status
pub(super) fn parse(rows: &[Sentence]) -> Vec<DhcpLeaseCount> {
    let mut aggregated: BTreeMap<(String, String), u64> = BTreeMap::new();
    for row in rows {
        // static leases without a server are not served by anything
        let Some(server) = row.get("server").filter(|s| !s.is_empty()) else {
            continue;
        };
        let status = row.get("status").unwrap_or("unknown");
        *aggregated
            .entry((server.to_string(), status.to_string()))
            .or_insert(0) += 1;
    }

    aggregated
        .into_iter()
        .map(|((server, status), count)| DhcpLeaseCount {
            server,
            status,
            count,
        })
        .collect()
}
