//! Rules — a time-windowed trigger bound to a color/credit resolution.
//!
//! A rule fires when one of its registered callbacks arrives while its
//! window is open. Firing resolves every associated light to the rule's
//! color and banks the rule's credit on it. Which lights, callbacks, and
//! profiles a rule is bound to lives in the store's association relations,
//! not on the rule itself.

use serde::{Deserialize, Serialize};

use crate::color::RuleColor;
use crate::credit::Credit;
use crate::error::{LumenError, ValidationError};
use crate::id::RuleId;
use crate::schedule::TimeWindow;

/// A persisted rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    /// Daily window during which the rule is armed.
    pub window: TimeWindow,
    /// Symbolic color applied to the rule's lights when it fires.
    pub color: RuleColor,
    /// Credit banked on each associated light when it fires.
    pub credit: Credit,
}

impl Rule {
    /// Attach a store-assigned identity to a validated draft.
    #[must_use]
    pub fn from_draft(id: RuleId, draft: RuleDraft) -> Self {
        Self {
            id,
            name: draft.name,
            window: draft.window,
            color: draft.color,
            credit: draft.credit,
        }
    }
}

/// A validated rule payload that has not been assigned an identity yet.
///
/// The store assigns integer keys, so creation goes draft-first: build and
/// validate here, persist through the repository, get a [`Rule`] back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    pub name: String,
    pub window: TimeWindow,
    pub color: RuleColor,
    pub credit: Credit,
}

impl RuleDraft {
    /// Create a builder for constructing a [`RuleDraft`].
    #[must_use]
    pub fn builder() -> RuleDraftBuilder {
        RuleDraftBuilder::default()
    }
}

/// Step-by-step builder for [`RuleDraft`].
#[derive(Debug, Default)]
pub struct RuleDraftBuilder {
    name: Option<String>,
    window: Option<TimeWindow>,
    color: Option<RuleColor>,
    credit: Option<Credit>,
}

impl RuleDraftBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn window(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    #[must_use]
    pub fn color(mut self, color: RuleColor) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn credit(mut self, credit: Credit) -> Self {
        self.credit = Some(credit);
        self
    }

    /// Consume the builder, validate, and return a [`RuleDraft`].
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when:
    /// - `name` is missing or empty ([`ValidationError::EmptyName`])
    /// - `window` is missing ([`ValidationError::MissingWindow`])
    pub fn build(self) -> Result<RuleDraft, LumenError> {
        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let Some(window) = self.window else {
            return Err(ValidationError::MissingWindow.into());
        };
        Ok(RuleDraft {
            name,
            window,
            color: self.color.unwrap_or_default(),
            credit: self.credit.unwrap_or(Credit::OFF),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TimeOfDay;

    fn evening_window() -> TimeWindow {
        TimeWindow::new(
            TimeOfDay::from_hms(18, 0, 0).unwrap(),
            TimeOfDay::from_hms(23, 0, 0).unwrap(),
        )
    }

    #[test]
    fn should_build_valid_draft_when_required_fields_provided() {
        let draft = RuleDraft::builder()
            .name("Evening porch")
            .window(evening_window())
            .color(RuleColor::Orange)
            .credit(Credit::minutes(30))
            .build()
            .unwrap();
        assert_eq!(draft.name, "Evening porch");
        assert_eq!(draft.color, RuleColor::Orange);
        assert_eq!(draft.credit, Credit::minutes(30));
    }

    #[test]
    fn should_default_to_white_and_zero_credit() {
        let draft = RuleDraft::builder()
            .name("Defaults")
            .window(evening_window())
            .build()
            .unwrap();
        assert_eq!(draft.color, RuleColor::White);
        assert_eq!(draft.credit, Credit::OFF);
    }

    #[test]
    fn should_return_validation_error_when_name_is_missing() {
        let result = RuleDraft::builder().window(evening_window()).build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_window_is_missing() {
        let result = RuleDraft::builder().name("No window").build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::MissingWindow))
        ));
    }

    #[test]
    fn should_attach_identity_via_from_draft() {
        let draft = RuleDraft::builder()
            .name("Evening porch")
            .window(evening_window())
            .build()
            .unwrap();
        let rule = Rule::from_draft(RuleId::from_i64(3), draft.clone());
        assert_eq!(rule.id, RuleId::from_i64(3));
        assert_eq!(rule.name, draft.name);
        assert_eq!(rule.window, draft.window);
    }
}
