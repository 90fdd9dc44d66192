// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! `/system/resource`

use super::number;
use crate::mikrotik::{Sentence, SystemResource};

pub(super) const COMMAND: &[&str] = &[
    "/system/resource/print",
    "=.proplist=uptime,cpu-load,free-memory,total-memory,version,board-name",
];

pub(super) fn parse(rows: &[Sentence]) -> SystemResource {
    let empty = Sentence::default();
    let first = rows.iter().find(|s| s.contains_key("version")).unwrap_or(&empty);
    SystemResource {
        uptime: first.get("uptime").unwrap_or("0s").to_string(),
        cpu_load: number(first, "cpu-load"),
        free_memory: number(first, "free-memory"),
        total_memory: number(first, "total-memory"),
        version: first.get("version").unwrap_or("unknown").to_string(),
        board_name: first.get("board-name").unwrap_or("unknown").to_string(),
    }
}
