//! Departure countdown for tripdeck.
//!
//! A pure computation of the time remaining until a target timestamp,
//! broken into whole days, hours, minutes, and seconds and floored at zero.
//! Callers decide how often to recompute; once per second is plenty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time remaining until a departure, floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    /// Whole days remaining.
    pub days: i64,
    /// Hours remaining after days are taken out (0..24).
    pub hours: i64,
    /// Minutes remaining after hours are taken out (0..60).
    pub minutes: i64,
    /// Seconds remaining after minutes are taken out (0..60).
    pub seconds: i64,
}

impl TimeRemaining {
    /// Check whether the countdown has expired.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl std::fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}d {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Compute the time remaining from `now` until `target`.
///
/// The difference is truncated to whole seconds and split by integer
/// division. Once `now` reaches or passes `target` the result is all zeros,
/// never negative.
#[must_use]
pub fn remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let total_seconds = (target - now).num_seconds().max(0);

    TimeRemaining {
        days: total_seconds / 86_400,
        hours: total_seconds % 86_400 / 3_600,
        minutes: total_seconds % 3_600 / 60,
        seconds: total_seconds % 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_remaining_splits_units() {
        // 1 day, 1 hour, 1 minute, 1 second
        let left = remaining(at(90_061), at(0));
        assert_eq!(
            left,
            TimeRemaining {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
    }

    #[test]
    fn test_remaining_at_target_is_zero() {
        let left = remaining(at(1_000), at(1_000));
        assert!(left.is_zero());
    }

    #[test]
    fn test_remaining_after_target_floors_at_zero() {
        let left = remaining(at(1_000), at(5_000));
        assert!(left.is_zero());
        assert_eq!(left.days, 0);
        assert_eq!(left.seconds, 0);
    }

    #[test]
    fn test_remaining_under_a_minute() {
        let left = remaining(at(59), at(0));
        assert_eq!(left.days, 0);
        assert_eq!(left.hours, 0);
        assert_eq!(left.minutes, 0);
        assert_eq!(left.seconds, 59);
    }

    #[test]
    fn test_remaining_sub_second_truncates() {
        let target = at(10);
        let now = Utc.timestamp_opt(9, 500_000_000).unwrap();
        // 0.5s left truncates to zero whole seconds
        let left = remaining(target, now);
        assert!(left.is_zero());
    }

    #[test]
    fn test_display_format() {
        let left = remaining(at(90_061), at(0));
        assert_eq!(left.to_string(), "1d 01:01:01");
    }

    #[test]
    fn test_serialization() {
        let left = remaining(at(3_725), at(0));
        let json = serde_json::to_string(&left).unwrap();
        let back: TimeRemaining = serde_json::from_str(&json).unwrap();
        assert_eq!(left, back);
    }
}
