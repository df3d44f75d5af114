//! Refresh policy calculation
//!
//! Converts a user-chosen interval and unit into a poll period, with a floor
//! below which auto-refresh is disabled entirely rather than clamped up.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fallback poll period when the unit is unrecognized: 5 minutes
pub const DEFAULT_POLL_MS: u64 = 300_000;

/// Periods below this are treated as "auto-refresh disabled"
pub const MIN_POLL_MS: u64 = 10_000;

/// Unit of a refresh interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshUnit {
    Seconds,
    #[default]
    Minutes,
    Hours,
    Days,
    Weeks,
    /// Fixed 30-day approximation, not calendar-aware
    Months,
}

impl RefreshUnit {
    /// Milliseconds per unit
    pub fn millis(self) -> u64 {
        match self {
            RefreshUnit::Seconds => 1_000,
            RefreshUnit::Minutes => 60_000,
            RefreshUnit::Hours => 3_600_000,
            RefreshUnit::Days => 86_400_000,
            RefreshUnit::Weeks => 604_800_000,
            RefreshUnit::Months => 2_592_000_000,
        }
    }

    /// Parse a lowercase unit name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "seconds" => Some(RefreshUnit::Seconds),
            "minutes" => Some(RefreshUnit::Minutes),
            "hours" => Some(RefreshUnit::Hours),
            "days" => Some(RefreshUnit::Days),
            "weeks" => Some(RefreshUnit::Weeks),
            "months" => Some(RefreshUnit::Months),
            _ => None,
        }
    }

    /// Stable lowercase name, matching the configuration surface
    pub fn as_str(self) -> &'static str {
        match self {
            RefreshUnit::Seconds => "seconds",
            RefreshUnit::Minutes => "minutes",
            RefreshUnit::Hours => "hours",
            RefreshUnit::Days => "days",
            RefreshUnit::Weeks => "weeks",
            RefreshUnit::Months => "months",
        }
    }
}

/// Convert an interval and unit name into milliseconds
///
/// An unrecognized unit yields [`DEFAULT_POLL_MS`] outright (the interval is
/// ignored, not multiplied).
pub fn to_millis(interval: u32, unit: &str) -> u64 {
    match RefreshUnit::parse(unit) {
        Some(u) => u64::from(interval) * u.millis(),
        None => DEFAULT_POLL_MS,
    }
}

/// Effective poll period, or `None` when auto-refresh is disabled
///
/// Values below [`MIN_POLL_MS`] disable polling instead of being clamped, so
/// a misconfigured source cannot hammer its backend in a sub-10-second loop.
pub fn poll_period(interval: u32, unit: &str) -> Option<Duration> {
    let millis = to_millis(interval, unit);
    if millis < MIN_POLL_MS {
        None
    } else {
        Some(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(5, "minutes", 300_000; "five minutes")]
    #[test_case(1, "seconds", 1_000; "one second")]
    #[test_case(2, "hours", 7_200_000; "two hours")]
    #[test_case(1, "days", 86_400_000; "one day")]
    #[test_case(1, "weeks", 604_800_000; "one week")]
    #[test_case(1, "months", 2_592_000_000; "one month is thirty days")]
    fn test_to_millis(interval: u32, unit: &str, expected: u64) {
        assert_eq!(to_millis(interval, unit), expected);
    }

    #[test]
    fn test_to_millis_unknown_unit_falls_back() {
        assert_eq!(to_millis(5, "bogus-unit"), DEFAULT_POLL_MS);
        assert_eq!(to_millis(999, "fortnights"), DEFAULT_POLL_MS);
    }

    #[test]
    fn test_poll_period_floor_disables() {
        assert_eq!(poll_period(1, "seconds"), None);
        assert_eq!(poll_period(9, "seconds"), None);
        assert_eq!(
            poll_period(10, "seconds"),
            Some(Duration::from_millis(10_000))
        );
        assert_eq!(
            poll_period(5, "minutes"),
            Some(Duration::from_millis(300_000))
        );
    }

    #[test]
    fn test_refresh_unit_serde_roundtrip() {
        let unit: RefreshUnit = serde_json::from_str("\"weeks\"").unwrap();
        assert_eq!(unit, RefreshUnit::Weeks);
        assert_eq!(serde_json::to_string(&unit).unwrap(), "\"weeks\"");
    }

    #[test]
    fn test_refresh_unit_parse_matches_as_str() {
        for unit in [
            RefreshUnit::Seconds,
            RefreshUnit::Minutes,
            RefreshUnit::Hours,
            RefreshUnit::Days,
            RefreshUnit::Weeks,
            RefreshUnit::Months,
        ] {
            assert_eq!(RefreshUnit::parse(unit.as_str()), Some(unit));
        }
    }
}
