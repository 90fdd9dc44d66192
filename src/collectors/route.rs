// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! `/ip/route`

use std::collections::BTreeMap;

use super::flag;
use crate::mikrotik::{RouteCount, Sentence};

pub(super) const COMMAND: &[&str] = &[
    "/ip/route/print",
    "=.proplist=active,connect,static,bgp,ospf,rip,dhcp,vpn",
];

/// Route source flags, checked in order
const PROTOCOLS: [&str; 7] = ["connect", "static", "bgp", "ospf", "rip", "dhcp", "vpn"];

fn protocol_of(row: &Sentence) -> &'static str {
    PROTOCOLS
        .into_iter()
        .find(|p| flag(row, p))
        .unwrap_or("other")
}

/// Count active routes per protocol
pub(super) fn parse(rows: &[Sentence]) -> Vec<RouteCount> {
    let mut counts: BTreeMap<&'static str, u64> = BTreeMap::new();
    for row in rows.iter().filter(|r| flag(r, "active")) {
        *counts.entry(protocol_of(row)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(protocol, count)| RouteCount {
            protocol: protocol.to_string(),
            count,
        })
        .collect()
}
