// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! `/system/health`
//!
//! RouterOS 7 returns one row per sensor (`name`, `value`, `type`), while
//! RouterOS 6 returns a single row with one attribute per sensor. Both are
//! normalised into [`HealthReading`]s without touching the reply.

use crate::mikrotik::{HealthReading, Sentence};

pub(super) const COMMAND: &[&str] = &["/system/health/print"];

pub(super) fn parse(rows: &[Sentence]) -> Vec<HealthReading> {
    let mut readings = Vec::new();
    for row in rows {
        if let (Some(name), Some(value)) = (row.get("name"), row.get("value")) {
            if let Ok(value) = value.parse() {
                readings.push(HealthReading {
                    name: name.to_string(),
                    value,
                });
            }
            continue;
        }

        // v6 layout
        let mut legacy: Vec<_> = row
            .attributes()
            .iter()
            .filter(|(key, _)| !key.starts_with('.'))
            .filter_map(|(key, value)| {
                Some(HealthReading {
                    name: key.clone(),
                    value: value.parse().ok()?,
                })
            })
            .collect();
        legacy.sort_by(|a, b| a.name.cmp(&b.name));
        readings.extend(legacy);
    }
    readings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_v7_rows() {
        let rows = [
            Sentence::new("!re")
                .with_attribute("name", "temperature")
                .with_attribute("value", "41")
                .with_attribute("type", "C"),
            Sentence::new("!re")
                .with_attribute("name", "voltage")
                .with_attribute("value", "24.1")
                .with_attribute("type", "V"),
            Sentence::new("!re")
                .with_attribute("name", "psu1-state")
                .with_attribute("value", "ok"),
        ];

        let readings = parse(&rows);

        assert_eq!(
            readings,
            vec![
                HealthReading {
                    name: "temperature".to_string(),
                    value: 41.0,
                },
                HealthReading {
                    name: "voltage".to_string(),
                    value: 24.1,
                },
            ]
        );
    }

    #[test]
    fn test_parse_v6_single_row() {
        let row = Sentence::new("!re")
            .with_attribute("voltage", "23.9")
            .with_attribute("temperature", "38")
            .with_attribute("fan-mode", "auto")
            .with_attribute(".id", "*1");

        let readings = parse(&[row]);

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].name, "temperature");
        assert!((readings[0].value - 38.0).abs() < f64::EPSILON);
        assert_eq!(readings[1].name, "voltage");
    }

    #[test]
    fn test_parse_no_sensors() {
        assert!(parse(&[]).is_empty());
    }
}
