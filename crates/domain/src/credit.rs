//! Credit model — the time-to-live counter carried by every light.
//!
//! A credit of `n > 0` means "stay on for another `n` minutes", `0` means
//! "off", and `-1` is the sticky "stay on forever" sentinel. The decay
//! ticker ages positive credits one step at a time; the sentinel and zero
//! are fixpoints. Negative values other than `-1` are unrepresentable:
//! construction goes through [`Credit::try_from`], which rejects them at
//! the administrative boundary.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Remaining "on" duration of a light, in minutes, with `-1` meaning forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Credit(i64);

impl Credit {
    /// The light should be off.
    pub const OFF: Self = Self(0);

    /// The light stays on indefinitely; decay never touches it.
    pub const FOREVER: Self = Self(-1);

    /// A credit of `minutes` remaining on.
    #[must_use]
    pub fn minutes(minutes: u32) -> Self {
        Self(i64::from(minutes))
    }

    /// One decay step: positive credits lose a minute, `0` and `-1` are
    /// unchanged.
    #[must_use]
    pub fn decay(self) -> Self {
        if self.0 > 0 { Self(self.0 - 1) } else { self }
    }

    /// Whether a light holding this credit should currently be lit.
    #[must_use]
    pub fn should_be_on(self) -> bool {
        self.0 > 0 || self == Self::FOREVER
    }

    /// The resolution guard: a newly resolved credit only takes effect when
    /// it does not shorten the commitment already banked on the light.
    ///
    /// True iff `self >= current` numerically or `self` is [`FOREVER`](Self::FOREVER).
    #[must_use]
    pub fn extends(self, current: Self) -> bool {
        self.0 >= current.0 || self == Self::FOREVER
    }

    /// Whether this is the [`FOREVER`](Self::FOREVER) sentinel.
    #[must_use]
    pub fn is_forever(self) -> bool {
        self == Self::FOREVER
    }

    /// Access the raw signed value (`-1`, `0`, or a positive minute count).
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Credit {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < -1 {
            Err(ValidationError::InvalidCredit(value))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Credit> for i64 {
    fn from(credit: Credit) -> Self {
        credit.0
    }
}

impl std::fmt::Display for Credit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
