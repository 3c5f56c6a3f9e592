//! Rule service — use-cases for managing rules and their associations.

use lumen_domain::error::{LumenError, NotFoundError, ValidationError};
use lumen_domain::id::{CallbackId, LightId, ProfileId, RuleId};
use lumen_domain::rule::{Rule, RuleDraft};

use crate::ports::RuleRepository;

/// A profile's rules split into associated and unassociated, for the
/// profile editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRules {
    pub associated: Vec<Rule>,
    pub unassociated: Vec<Rule>,
}

/// Application service for rule CRUD and association management.
pub struct RuleService<R> {
    repo: R,
}

impl<R: RuleRepository> RuleService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a rule from a validated draft plus its light and callback
    /// associations. The rule starts unassigned to any profile.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when no lights
    /// ([`ValidationError::NoLights`]) or no callbacks
    /// ([`ValidationError::NoCallbacks`]) are given, or a storage error
    /// from the repository.
    #[tracing::instrument(skip(self, draft), fields(rule_name = %draft.name))]
    pub async fn create_rule(
        &self,
        draft: RuleDraft,
        lights: &[LightId],
        callbacks: &[CallbackId],
    ) -> Result<Rule, LumenError> {
        if lights.is_empty() {
            return Err(ValidationError::NoLights.into());
        }
        if callbacks.is_empty() {
            return Err(ValidationError::NoCallbacks.into());
        }
        self.repo.create(draft, lights, callbacks).await
    }

    /// Look up a rule by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when no rule with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_rule(&self, id: RuleId) -> Result<Rule, LumenError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Rule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all rules.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rules(&self) -> Result<Vec<Rule>, LumenError> {
        self.repo.get_all().await
    }

    /// Delete a rule; its associations cascade with it.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn remove_rule(&self, id: RuleId) -> Result<(), LumenError> {
        self.repo.delete(id).await
    }

    /// Rules associated with `profile` alongside those that are not, for
    /// the profile editing surface.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn profile_rules(&self, profile: ProfileId) -> Result<ProfileRules, LumenError> {
        Ok(ProfileRules {
            associated: self.repo.rules_for_profile(profile).await?,
            unassociated: self.repo.rules_outside_profile(profile).await?,
        })
    }
}
