// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Value parsers for RouterOS attribute formats

/// Seconds per RouterOS duration unit
fn unit_seconds(unit: &str) -> Option<u64> {
    match unit {
        "w" => Some(7 * 86_400),
        "d" => Some(86_400),
        "h" => Some(3_600),
        "m" => Some(60),
        "s" | "" => Some(1),
        // sub-second parts are dropped
        "ms" | "us" => Some(0),
        _ => None,
    }
}

/// Parse a RouterOS uptime string to whole seconds
///
/// Accepts `1w2d3h4m5s` style durations (any subset of units, in order)
/// and the clock forms `HH:MM:SS` and `MM:SS`. Unrecognised parts count
/// as zero.
pub fn parse_uptime_to_seconds(s: &str) -> u64 {
    let s = s.trim();
    if s.contains(':') {
        return s
            .split(':')
            .map(|part| part.parse::<u64>().unwrap_or(0))
            .fold(0, |acc, part| acc * 60 + part);
    }

    let mut total = 0u64;
    let mut rest = s;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (number, tail) = rest.split_at(digits);
        let unit_len = tail.find(|c: char| c.is_ascii_digit()).unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        if let (Ok(value), Some(scale)) = (number.parse::<u64>(), unit_seconds(unit)) {
            total = total.saturating_add(value.saturating_mul(scale));
        }
        rest = tail;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uptime() {
        assert_eq!(parse_uptime_to_seconds("1d2h3m4s"), 93784);
        assert_eq!(parse_uptime_to_seconds("1h5m"), 3900);
        assert_eq!(parse_uptime_to_seconds("30s"), 30);
        assert_eq!(parse_uptime_to_seconds("05:23:10"), 19390);
        assert_eq!(parse_uptime_to_seconds("23:10"), 1390);
    }

    #[test]
    fn test_parse_uptime_drops_milliseconds() {
        assert_eq!(parse_uptime_to_seconds("3m12s450ms"), 192);
    }

    #[test]
    fn test_parse_uptime_bare_number_is_seconds() {
        assert_eq!(parse_uptime_to_seconds("42"), 42);
    }
}
