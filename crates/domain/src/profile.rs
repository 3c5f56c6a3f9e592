//! Profiles — named rule scopes; at most one is active at a time.

use serde::{Deserialize, Serialize};

use crate::error::{LumenError, ValidationError};
use crate::id::ProfileId;

/// A named grouping of rules. Only rules associated with the currently
/// active profile are eligible for triggering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
}

impl Profile {
    #[must_use]
    pub fn new(id: ProfileId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when the name is empty.
    pub fn validate(&self) -> Result<(), LumenError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_named_profile() {
        let profile = Profile::new(ProfileId::from_i64(1), "Evening");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn should_reject_empty_name() {
        let profile = Profile::new(ProfileId::from_i64(1), "");
        assert!(matches!(
            profile.validate(),
            Err(LumenError::Validation(ValidationError::EmptyName))
        ));
    }
}
