//! Colors — symbolic rule colors and their concrete light values.
//!
//! Rules store a symbolic color name. Resolution maps it to a concrete
//! hue/saturation/brightness triple: named hues at a muted saturation,
//! white at zero saturation. Parsing is deliberately lenient — input is
//! trimmed, case is ignored, and anything unrecognized falls back to
//! [`RuleColor::White`] rather than erroring. Policy changes go through
//! [`RuleColor::parse`] alone.

use serde::{Deserialize, Serialize};

/// Saturation applied to every named hue.
const ACCENT_SATURATION: f32 = 0.4;

/// Symbolic color carried by a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    #[default]
    White,
}

impl RuleColor {
    /// Parse a stored color name, trimmed and case-insensitive.
    ///
    /// Unrecognized or empty input maps to [`RuleColor::White`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "red" => Self::Red,
            "orange" => Self::Orange,
            "yellow" => Self::Yellow,
            "green" => Self::Green,
            "blue" => Self::Blue,
            "purple" => Self::Purple,
            _ => Self::White,
        }
    }

    /// Canonical name as stored in the rule record.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::White => "White",
        }
    }

    /// Resolve to the concrete color sent to the light control port.
    #[must_use]
    pub fn resolve(self) -> LightColor {
        match self {
            Self::Red => LightColor::hue(0),
            Self::Orange => LightColor::hue(36),
            Self::Yellow => LightColor::hue(60),
            Self::Green => LightColor::hue(120),
            Self::Blue => LightColor::hue(250),
            Self::Purple => LightColor::hue(280),
            Self::White => LightColor::white(),
        }
    }
}

impl std::fmt::Display for RuleColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete color value addressed to a bulb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightColor {
    /// Hue in degrees, `[0, 360)`.
    pub hue: u16,
    /// Saturation, `0.0..=1.0`; `0.0` is white.
    pub saturation: f32,
    /// Brightness, `0.0..=1.0`.
    pub brightness: f32,
}

impl LightColor {
    /// A named hue at the muted accent saturation, full brightness.
    #[must_use]
    pub fn hue(hue: u16) -> Self {
        Self {
            hue,
            saturation: ACCENT_SATURATION,
            brightness: 1.0,
        }
    }

    /// Full white: zero saturation, full brightness.
    #[must_use]
    pub fn white() -> Self {
        Self {
            hue: 0,
            saturation: 0.0,
            brightness: 1.0,
        }
    }
}
