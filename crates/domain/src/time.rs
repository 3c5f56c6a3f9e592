//! Time and timestamp helpers.

use chrono::{DateTime, Timelike, Utc};

use crate::schedule::TimeOfDay;

/// UTC timestamp used for event reception times and audit fields.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the current wall-clock time of day in the local timezone.
///
/// Rule windows are written against the clock on the wall ("23:00 to 06:00"),
/// so trigger gating uses local time, not UTC.
#[must_use]
pub fn local_time_of_day() -> TimeOfDay {
    let local = chrono::Local::now();
    TimeOfDay::try_from(local.num_seconds_from_midnight())
        .unwrap_or_else(|_| TimeOfDay::midnight())
}
