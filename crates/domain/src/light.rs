//! Lights — addressable bulbs with a banked credit.

use serde::{Deserialize, Serialize};

use crate::credit::Credit;
use crate::error::{LumenError, ValidationError};
use crate::id::LightId;

/// A persisted light: the device label used to address the physical bulb
/// plus the credit currently banked on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Light {
    pub id: LightId,
    /// Device label, matched against the labels the control port discovers.
    pub label: String,
    /// Remaining "on" duration; see [`Credit`].
    pub credit: Credit,
}

impl Light {
    /// Build a light with the given identity and label, starting at credit 0.
    #[must_use]
    pub fn new(id: LightId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            credit: Credit::OFF,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when the label is empty
    /// ([`ValidationError::EmptyLabel`]).
    pub fn validate(&self) -> Result<(), LumenError> {
        if self.label.trim().is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_with_zero_credit() {
        let light = Light::new(LightId::from_i64(1), "Porch");
        assert_eq!(light.credit, Credit::OFF);
        assert!(light.validate().is_ok());
    }

    #[test]
    fn should_reject_empty_label() {
        let light = Light::new(LightId::from_i64(1), "   ");
        assert!(matches!(
            light.validate(),
            Err(LumenError::Validation(ValidationError::EmptyLabel))
        ));
    }
}
