//! Time-of-day values and signed deltas for cue timing
//!
//! `TimePoint` counts nanoseconds since midnight with no upper bound:
//! shifting a document past 24h yields large-hour timestamps, which every
//! supported grammar renders fine. There is no wraparound; a shift below
//! zero fails with `TimeOutOfRange` and mutates nothing.

use crate::core::errors::{Result, SubtitleError};
use core::fmt;

const NANOS_PER_MILLI: u64 = 1_000_000;
const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// A time-of-day position with nanosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimePoint {
    nanos: u64,
}

impl TimePoint {
    /// Create a time point from raw nanoseconds since midnight
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Create a time point from milliseconds since midnight
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis * NANOS_PER_MILLI,
        }
    }

    /// Create a time point from clock components.
    ///
    /// # Errors
    /// Returns `Malformed` (line 0) if minutes, seconds or milliseconds
    /// exceed their clock range, or if the total overflows the
    /// nanosecond representation. Hours are otherwise unbounded.
    pub fn from_components(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Result<Self> {
        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(SubtitleError::malformed(
                0,
                format!("invalid time components: {hours}:{minutes}:{seconds}.{millis}"),
            ));
        }
        let sub_hour = minutes * MILLIS_PER_MINUTE + seconds * MILLIS_PER_SECOND + millis;
        hours
            .checked_mul(MILLIS_PER_HOUR)
            .and_then(|ms| ms.checked_add(sub_hour))
            .and_then(|ms| ms.checked_mul(NANOS_PER_MILLI))
            .map(|nanos| Self { nanos })
            .ok_or_else(|| {
                SubtitleError::malformed(
                    0,
                    format!("time value overflows: {hours}:{minutes}:{seconds}.{millis}"),
                )
            })
    }

    /// Raw nanoseconds since midnight
    #[must_use]
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Whole milliseconds since midnight (sub-millisecond part truncated)
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.nanos / NANOS_PER_MILLI
    }

    /// Split into `(hours, minutes, seconds, millis)` for serialization
    #[must_use]
    pub const fn components(&self) -> (u64, u64, u64, u64) {
        let ms = self.as_millis();
        (
            ms / MILLIS_PER_HOUR,
            (ms % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
            (ms % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND,
            ms % MILLIS_PER_SECOND,
        )
    }

    /// Apply a signed delta, failing if the result would precede midnight.
    ///
    /// # Errors
    /// `TimeOutOfRange` carrying the would-be negative nanosecond value.
    pub fn checked_offset(&self, delta: TimeDelta) -> Result<Self> {
        let shifted = self.nanos as i128 + delta.as_nanos() as i128;
        if shifted < 0 {
            return Err(SubtitleError::TimeOutOfRange {
                nanos: shifted as i64,
            });
        }
        Ok(Self {
            nanos: shifted as u64,
        })
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s, ms) = self.components();
        write!(f, "{h:02}:{m:02}:{s:02}.{ms:03}")
    }
}

/// A signed duration between two time points, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeDelta {
    nanos: i64,
}

impl TimeDelta {
    /// Zero-length delta
    pub const ZERO: Self = Self { nanos: 0 };

    /// Create a delta from raw signed nanoseconds
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// Create a delta from signed milliseconds
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            nanos: millis * NANOS_PER_MILLI as i64,
        }
    }

    /// The signed difference `later - earlier`
    #[must_use]
    pub const fn between(later: TimePoint, earlier: TimePoint) -> Self {
        Self {
            nanos: later.as_nanos() as i64 - earlier.as_nanos() as i64,
        }
    }

    /// Raw signed nanoseconds
    #[must_use]
    pub const fn as_nanos(&self) -> i64 {
        self.nanos
    }

    /// Check if this delta is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.nanos == 0
    }
}

/// A start/end pair of time points. Shift logic assumes `start <= end`,
/// though not every source format enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimedRange {
    pub start: TimePoint,
    pub end: TimePoint,
}

impl TimedRange {
    /// Create a new range
    #[must_use]
    pub const fn new(start: TimePoint, end: TimePoint) -> Self {
        Self { start, end }
    }

    /// Shift both endpoints by a delta, all-or-nothing.
    ///
    /// # Errors
    /// `TimeOutOfRange` if either endpoint would precede midnight; the
    /// range is left unchanged in that case.
    pub fn shift(&mut self, delta: TimeDelta) -> Result<()> {
        let start = self.start.checked_offset(delta)?;
        let end = self.end.checked_offset(delta)?;
        self.start = start;
        self.end = end;
        Ok(())
    }
}

impl fmt::Display for TimedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_roundtrip() {
        let t = TimePoint::from_components(1, 23, 45, 678).unwrap();
        assert_eq!(t.components(), (1, 23, 45, 678));
        assert_eq!(t.as_millis(), 5_025_678);
    }

    #[test]
    fn component_validation() {
        assert!(TimePoint::from_components(0, 60, 0, 0).is_err());
        assert!(TimePoint::from_components(0, 0, 60, 0).is_err());
        assert!(TimePoint::from_components(0, 0, 0, 1000).is_err());
        // Hours are unbounded
        assert!(TimePoint::from_components(25, 0, 0, 0).is_ok());
    }

    #[test]
    fn component_overflow_is_malformed() {
        // Parseable but absurd hour counts must error, not wrap
        let err = TimePoint::from_components(99_999_999_999_999_999, 0, 0, 0).unwrap_err();
        assert!(matches!(err, SubtitleError::Malformed { .. }));
        let err = TimePoint::from_components(u64::MAX, 0, 0, 0).unwrap_err();
        assert!(matches!(err, SubtitleError::Malformed { .. }));
    }

    #[test]
    fn delta_between() {
        let a = TimePoint::from_millis(5_000);
        let b = TimePoint::from_millis(2_000);
        assert_eq!(TimeDelta::between(a, b), TimeDelta::from_millis(3_000));
        assert_eq!(TimeDelta::between(b, a), TimeDelta::from_millis(-3_000));
    }

    #[test]
    fn offset_past_midnight_upward() {
        let t = TimePoint::from_components(23, 59, 0, 0).unwrap();
        let shifted = t.checked_offset(TimeDelta::from_millis(120_000)).unwrap();
        assert_eq!(shifted.components(), (24, 1, 0, 0));
    }

    #[test]
    fn offset_below_zero_fails() {
        let t = TimePoint::from_millis(1_000);
        let err = t.checked_offset(TimeDelta::from_millis(-2_000)).unwrap_err();
        assert!(matches!(err, SubtitleError::TimeOutOfRange { .. }));
    }

    #[test]
    fn range_shift_is_atomic() {
        let mut range = TimedRange::new(TimePoint::from_millis(500), TimePoint::from_millis(900));
        let before = range;
        assert!(range.shift(TimeDelta::from_millis(-600)).is_err());
        assert_eq!(range, before);

        range.shift(TimeDelta::from_millis(100)).unwrap();
        assert_eq!(range.start, TimePoint::from_millis(600));
        assert_eq!(range.end, TimePoint::from_millis(1_000));
    }

    #[test]
    fn display_format() {
        let t = TimePoint::from_components(1, 2, 3, 45).unwrap();
        assert_eq!(t.to_string(), "01:02:03.045");
    }
}
