// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Per-subsystem collectors
//!
//! Every collector issues one fixed query and maps the reply rows into the
//! typed stats of [`RouterMetrics`]. The set of collectors is the explicit
//! [`Collector::ALL`] table; configuration refers to them by name.

mod dhcp;
mod health;
mod interface;
mod resource;
mod route;

use std::fmt;

use crate::mikrotik::{Reply, RouterMetrics, Sentence};

/// A RouterOS subsystem the exporter knows how to scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collector {
    Resource,
    Interface,
    Health,
    Dhcp,
    Route,
}

impl Collector {
    /// Every available collector, in scrape order
    pub const ALL: [Collector; 5] = [
        Collector::Resource,
        Collector::Interface,
        Collector::Health,
        Collector::Dhcp,
        Collector::Route,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Interface => "interface",
            Self::Health => "health",
            Self::Dhcp => "dhcp",
            Self::Route => "route",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Command words sent to the device
    #[must_use]
    pub fn command(self) -> &'static [&'static str] {
        match self {
            Self::Resource => resource::COMMAND,
            Self::Interface => interface::COMMAND,
            Self::Health => health::COMMAND,
            Self::Dhcp => dhcp::COMMAND,
            Self::Route => route::COMMAND,
        }
    }

    /// Maps the reply rows into the matching section of `out`
    pub fn apply(self, reply: &Reply, out: &mut RouterMetrics) {
        let rows = reply.rows();
        match self {
            Self::Resource => out.system = Some(resource::parse(rows)),
            Self::Interface => out.interfaces = interface::parse(rows),
            Self::Health => out.health = health::parse(rows),
            Self::Dhcp => out.dhcp_leases = dhcp::parse(rows),
            Self::Route => out.routes = route::parse(rows),
        }
    }
}

impl fmt::Display for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric attribute, `0` when absent or unparsable
fn number(sentence: &Sentence, key: &str) -> u64 {
    sentence.get(key).and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// RouterOS booleans are the literal strings `true`/`false`
fn flag(sentence: &Sentence, key: &str) -> bool {
    sentence.get(key) == Some("true")
}
