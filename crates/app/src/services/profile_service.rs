//! Profile service — profile lifecycle and the active-profile switch.

use lumen_domain::error::{LumenError, NotFoundError, ValidationError};
use lumen_domain::id::{ProfileId, RuleId};
use lumen_domain::profile::Profile;

use crate::ports::{ProfileStore, RuleRepository};

/// Application service for profile management.
///
/// Needs the rule repository as well: a profile's rule set lives in the
/// rule↔profile association relation, which the rules own.
pub struct ProfileService<PS, RR> {
    profiles: PS,
    rules: RR,
}

impl<PS: ProfileStore, RR: RuleRepository> ProfileService<PS, RR> {
    /// Create a new service backed by the given stores.
    pub fn new(profiles: PS, rules: RR) -> Self {
        Self { profiles, rules }
    }

    /// Create a profile with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when the name is empty, or a
    /// storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn create_profile(&self, name: &str) -> Result<Profile, LumenError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        self.profiles.create(name).await
    }

    /// List all profiles.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, LumenError> {
        self.profiles.get_all().await
    }

    /// Delete a profile. If it was active, rule selection goes dark until
    /// another profile is activated.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn remove_profile(&self, id: ProfileId) -> Result<(), LumenError> {
        self.profiles.delete(id).await
    }

    /// Replace `profile`'s rule set with exactly `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when the profile does not exist,
    /// or a storage error.
    #[tracing::instrument(skip(self, rules), fields(rules = rules.len()))]
    pub async fn set_profile_rules(
        &self,
        profile: ProfileId,
        rules: &[RuleId],
    ) -> Result<(), LumenError> {
        self.ensure_exists(profile).await?;
        self.rules.set_profile_rules(profile, rules).await
    }

    /// Point the active-profile singleton at `profile`, or clear it.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when activating a profile that
    /// does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn activate(&self, profile: Option<ProfileId>) -> Result<(), LumenError> {
        if let Some(id) = profile {
            self.ensure_exists(id).await?;
        }
        self.profiles.set_active_profile(profile).await
    }

    /// The currently active profile, if any.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn active(&self) -> Result<Option<ProfileId>, LumenError> {
        self.profiles.active_profile().await
    }

    async fn ensure_exists(&self, id: ProfileId) -> Result<(), LumenError> {
        self.profiles.get_by_id(id).await?.ok_or_else(|| {
            LumenError::from(NotFoundError {
                entity: "Profile",
                id: id.to_string(),
            })
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{InMemoryProfileStore, InMemoryRuleRepo};

    fn service() -> ProfileService<InMemoryProfileStore, InMemoryRuleRepo> {
        ProfileService::new(InMemoryProfileStore::default(), InMemoryRuleRepo::default())
    }

    #[tokio::test]
    async fn should_create_and_list_profiles() {
        let service = service();
        let day = service.create_profile("day").await.unwrap();
        let evening = service.create_profile("evening").await.unwrap();
        assert_eq!(service.list_profiles().await.unwrap(), vec![day, evening]);
    }

    #[tokio::test]
    async fn should_reject_empty_profile_name() {
        let service = service();
        let result = service.create_profile("  ").await;
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_activate_existing_profile() {
        let service = service();
        let profile = service.create_profile("evening").await.unwrap();
        service.activate(Some(profile.id)).await.unwrap();
        assert_eq!(service.active().await.unwrap(), Some(profile.id));
    }

    #[tokio::test]
    async fn should_reject_activating_unknown_profile() {
        let service = service();
        let result = service.activate(Some(ProfileId::from_i64(404))).await;
        assert!(matches!(result, Err(LumenError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_clear_active_profile() {
        let service = service();
        let profile = service.create_profile("evening").await.unwrap();
        service.activate(Some(profile.id)).await.unwrap();
        service.activate(None).await.unwrap();
        assert_eq!(service.active().await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_clear_active_pointer_when_profile_is_deleted() {
        let service = service();
        let profile = service.create_profile("evening").await.unwrap();
        service.activate(Some(profile.id)).await.unwrap();
        service.remove_profile(profile.id).await.unwrap();
        assert_eq!(service.active().await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_reject_setting_rules_for_unknown_profile() {
        let service = service();
        let result = service
            .set_profile_rules(ProfileId::from_i64(404), &[])
            .await;
        assert!(matches!(result, Err(LumenError::NotFound(_))));
    }
}
