//! Schedules — daily time windows that gate rule resolution.
//!
//! A window is a pair of times of day. When `start <= end` the window is a
//! plain same-day interval; when `start > end` it wraps past midnight
//! (e.g. 23:00 to 06:00). Both endpoints are inclusive.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Seconds in a day; times of day live in `[0, SECONDS_PER_DAY)`.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// A time of day expressed as seconds since midnight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Midnight, the start of the day.
    #[must_use]
    pub fn midnight() -> Self {
        Self(0)
    }

    /// Build from an hour/minute/second triple.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeOfDay`] when the triple lands
    /// outside the day. The sum saturates, so oversized input is rejected
    /// rather than wrapping.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, ValidationError> {
        Self::try_from(
            hour.saturating_mul(3600)
                .saturating_add(minute.saturating_mul(60))
                .saturating_add(second),
        )
    }

    /// Access the raw seconds-since-midnight value.
    #[must_use]
    pub fn as_seconds(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(seconds: u32) -> Result<Self, Self::Error> {
        if seconds < SECONDS_PER_DAY {
            Ok(Self(seconds))
        } else {
            Err(ValidationError::InvalidTimeOfDay(seconds))
        }
    }
}

impl From<TimeOfDay> for u32 {
    fn from(tod: TimeOfDay) -> Self {
        tod.0
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0 / 3600,
            (self.0 / 60) % 60,
            self.0 % 60
        )
    }
}

/// A daily window during which a rule is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First instant (inclusive) at which the window is open.
    pub start: TimeOfDay,
    /// Last instant (inclusive) at which the window is open.
    pub end: TimeOfDay,
}

impl TimeWindow {
    /// Build a window from two times of day. `start > end` wraps midnight.
    #[must_use]
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// The full day; always armed.
    #[must_use]
    pub fn all_day() -> Self {
        Self {
            start: TimeOfDay(0),
            end: TimeOfDay(SECONDS_PER_DAY - 1),
        }
    }

    /// Whether this window wraps past midnight.
    #[must_use]
    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    /// Whether `now` falls inside the window, both endpoints inclusive.
    ///
    /// Overnight windows use the symmetric test `now >= start || now <= end`
    /// so that values just after midnight match without any signed-offset
    /// normalization.
    #[must_use]
    pub fn contains(&self, now: TimeOfDay) -> bool {
        if self.wraps_midnight() {
            now >= self.start || now <= self.end
        } else {
            self.start <= now && now <= self.end
        }
    }
}
