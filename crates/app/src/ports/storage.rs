//! Storage ports — repository traits for the persistent store.
//!
//! The engine only ever issues the reads and the single credit write listed
//! here; the broader CRUD surface exists for the administrative services.
//! All association relations (rule↔light, rule↔profile, rule↔callback) are
//! owned by their rule and live behind [`RuleRepository`].

use std::future::Future;

use lumen_domain::credit::Credit;
use lumen_domain::error::LumenError;
use lumen_domain::id::{CallbackId, LightId, ProfileId, RuleId};
use lumen_domain::light::Light;
use lumen_domain::profile::Profile;
use lumen_domain::rule::{Rule, RuleDraft};

/// Repository for persisted [`Light`]s and their credits.
pub trait LightRepository {
    /// Persist a new light with the given label at credit 0, assigning its id.
    fn create(&self, label: &str) -> impl Future<Output = Result<Light, LumenError>> + Send;

    /// Get a light by its unique identifier.
    fn get_by_id(
        &self,
        id: LightId,
    ) -> impl Future<Output = Result<Option<Light>, LumenError>> + Send;

    /// Get a light by its device label.
    fn get_by_label(
        &self,
        label: &str,
    ) -> impl Future<Output = Result<Option<Light>, LumenError>> + Send;

    /// Get all lights.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Light>, LumenError>> + Send;

    /// Persist a new credit value for the given light.
    fn update_credit(
        &self,
        id: LightId,
        credit: Credit,
    ) -> impl Future<Output = Result<(), LumenError>> + Send;

    /// Delete a light by its unique identifier.
    fn delete(&self, id: LightId) -> impl Future<Output = Result<(), LumenError>> + Send;
}

/// Repository for persisted [`Rule`]s and their association relations.
pub trait RuleRepository {
    /// Persist a validated draft with its light and callback associations,
    /// assigning the rule's id. The new rule starts with no profile
    /// association ("unassigned") and is never selected as a candidate
    /// until one is added.
    fn create(
        &self,
        draft: RuleDraft,
        lights: &[LightId],
        callbacks: &[CallbackId],
    ) -> impl Future<Output = Result<Rule, LumenError>> + Send;

    /// Get a rule by its unique identifier.
    fn get_by_id(&self, id: RuleId)
    -> impl Future<Output = Result<Option<Rule>, LumenError>> + Send;

    /// Get all rules.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, LumenError>> + Send;

    /// Delete a rule; its associations cascade with it.
    fn delete(&self, id: RuleId) -> impl Future<Output = Result<(), LumenError>> + Send;

    /// Lights associated with the given rule.
    fn lights_for(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Vec<LightId>, LumenError>> + Send;

    /// Candidate rules for a firing callback under the given profile: the
    /// intersection of the profile's rules and the callback's rules.
    fn candidates(
        &self,
        profile: ProfileId,
        callback: CallbackId,
    ) -> impl Future<Output = Result<Vec<RuleId>, LumenError>> + Send;

    /// Rules associated with the given profile.
    fn rules_for_profile(
        &self,
        profile: ProfileId,
    ) -> impl Future<Output = Result<Vec<Rule>, LumenError>> + Send;

    /// Rules with no association to the given profile.
    fn rules_outside_profile(
        &self,
        profile: ProfileId,
    ) -> impl Future<Output = Result<Vec<Rule>, LumenError>> + Send;

    /// Replace the given profile's rule set with exactly `rules`.
    fn set_profile_rules(
        &self,
        profile: ProfileId,
        rules: &[RuleId],
    ) -> impl Future<Output = Result<(), LumenError>> + Send;
}

/// Store for [`Profile`]s and the active-profile singleton.
///
/// The active profile is an explicit accessor pair rather than a global so
/// tests can inject arbitrary states.
pub trait ProfileStore {
    /// Persist a new profile, assigning its id.
    fn create(&self, name: &str) -> impl Future<Output = Result<Profile, LumenError>> + Send;

    /// Get a profile by its unique identifier.
    fn get_by_id(
        &self,
        id: ProfileId,
    ) -> impl Future<Output = Result<Option<Profile>, LumenError>> + Send;

    /// Get all profiles.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Profile>, LumenError>> + Send;

    /// Delete a profile by its unique identifier.
    fn delete(&self, id: ProfileId) -> impl Future<Output = Result<(), LumenError>> + Send;

    /// The currently active profile, if any. `None` means no rule is
    /// eligible for triggering.
    fn active_profile(
        &self,
    ) -> impl Future<Output = Result<Option<ProfileId>, LumenError>> + Send;

    /// Point the active-profile singleton at `profile` (or clear it).
    fn set_active_profile(
        &self,
        profile: Option<ProfileId>,
    ) -> impl Future<Output = Result<(), LumenError>> + Send;
}
