// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! `/interface`

use super::{flag, number};
use crate::mikrotik::{InterfaceStats, Sentence};

pub(super) const COMMAND: &[&str] = &[
    "/interface/print",
    "=.proplist=name,rx-byte,tx-byte,rx-packet,tx-packet,rx-error,tx-error,running",
];

pub(super) fn parse(rows: &[Sentence]) -> Vec<InterfaceStats> {
    rows.iter()
        .filter_map(|s| {
            let name = s.get("name")?;
            Some(InterfaceStats {
                name: name.to_string(),
                rx_bytes: number(s, "rx-byte"),
                tx_bytes: number(s, "tx-byte"),
                rx_packets: number(s, "rx-packet"),
                tx_packets: number(s, "tx-packet"),
                rx_errors: number(s, "rx-error"),
                tx_errors: number(s, "tx-error"),
                running: flag(s, "running"),
            })
        })
        .collect()
}
