//! Lighting engine — resolves rules against lights when callbacks fire.
//!
//! A firing callback selects the candidate rules for the active profile,
//! gates each one on its time window, and resolves the survivors: every
//! associated light gets the rule's color and banks the rule's credit,
//! subject to the no-regression guard. The engine also owns the decay
//! pass the [`DecayTicker`](crate::decay::DecayTicker) drives.

use std::time::Duration;

use lumen_domain::color::LightColor;
use lumen_domain::credit::Credit;
use lumen_domain::error::{LumenError, NotFoundError};
use lumen_domain::id::{CallbackId, LightId, RuleId};
use lumen_domain::rule::Rule;
use lumen_domain::time::local_time_of_day;

use crate::locks::LightLocks;
use crate::ports::{LightControl, LightRepository, ProfileStore, RuleRepository};

/// Fade applied to every color command.
const COLOR_FADE: Duration = Duration::from_secs(5);

/// What a light resolution decided, captured under the light's lock and
/// acted on after it is released.
enum PlannedCommand {
    /// Credit was banked; command color + power-on, with one retry.
    On { label: String, color: LightColor },
    /// Credit 0 was persisted; command power-off, best effort.
    Off { label: String },
    /// The guard rejected the new credit; no device command.
    None,
}

/// Rule resolution engine, generic over the storage and device ports.
pub struct LightingEngine<RR, LR, PS, LC> {
    rules: RR,
    lights: LR,
    profiles: PS,
    control: LC,
    locks: LightLocks,
}

impl<RR, LR, PS, LC> LightingEngine<RR, LR, PS, LC>
where
    RR: RuleRepository,
    LR: LightRepository,
    PS: ProfileStore,
    LC: LightControl,
{
    /// Create a new engine over the given ports.
    pub fn new(rules: RR, lights: LR, profiles: PS, control: LC) -> Self {
        Self {
            rules,
            lights,
            profiles,
            control,
            locks: LightLocks::new(),
        }
    }

    /// Borrow the underlying light repository.
    #[must_use]
    pub fn lights(&self) -> &LR {
        &self.lights
    }

    /// Borrow the underlying rule repository.
    #[must_use]
    pub fn rules(&self) -> &RR {
        &self.rules
    }

    /// Borrow the underlying profile store.
    #[must_use]
    pub fn profiles(&self) -> &PS {
        &self.profiles
    }

    /// Borrow the underlying light control port.
    #[must_use]
    pub fn control(&self) -> &LC {
        &self.control
    }

    /// Process a firing callback: select candidate rules for the active
    /// profile and resolve each one. Returns the ids of the rules that
    /// actually resolved (armed and executed).
    ///
    /// No active profile and no matching rules are silent no-ops. A
    /// failure while resolving one rule is logged and does not block the
    /// remaining candidates.
    ///
    /// # Errors
    ///
    /// Returns a storage error if reading the active profile or the
    /// candidate set fails.
    pub async fn handle_callback(
        &self,
        callback: CallbackId,
    ) -> Result<Vec<RuleId>, LumenError> {
        let Some(profile) = self.profiles.active_profile().await? else {
            tracing::debug!(%callback, "no active profile, ignoring callback");
            return Ok(Vec::new());
        };

        let candidates = self.rules.candidates(profile, callback).await?;
        let mut resolved = Vec::new();
        for rule_id in candidates {
            match self.resolve_rule(rule_id).await {
                Ok(true) => resolved.push(rule_id),
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(%err, rule = %rule_id, "rule resolution failed");
                }
            }
        }
        Ok(resolved)
    }

    /// Resolve a single rule, callback-driven or manual.
    ///
    /// Returns `false` when the rule's window is closed (a no-op, not an
    /// error) and `true` when the rule executed. Each associated light is
    /// resolved independently; a failure on one is logged and does not
    /// block the others.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when the rule does not exist, or a
    /// storage error from loading the rule and its associations.
    pub async fn resolve_rule(&self, id: RuleId) -> Result<bool, LumenError> {
        let rule = self.rules.get_by_id(id).await?.ok_or_else(|| NotFoundError {
            entity: "Rule",
            id: id.to_string(),
        })?;

        if !rule.window.contains(local_time_of_day()) {
            tracing::debug!(rule = %rule.id, window_start = %rule.window.start, "rule window closed, skipping");
            return Ok(false);
        }

        let color = rule.color.resolve();
        let light_ids = self.rules.lights_for(rule.id).await?;
        for light_id in light_ids {
            if let Err(err) = self.resolve_light(light_id, &rule, color).await {
                tracing::warn!(%err, rule = %rule.id, light = %light_id, "light resolution failed");
            }
        }
        Ok(true)
    }

    /// Resolve one light against a rule's payload.
    ///
    /// The credit read-decide-write runs under the light's lock; the
    /// intended credit is persisted before any device command, and the
    /// lock is released before the (possibly slow) command is issued.
    async fn resolve_light(
        &self,
        light_id: LightId,
        rule: &Rule,
        color: LightColor,
    ) -> Result<(), LumenError> {
        let planned = {
            let _guard = self.locks.acquire(light_id).await;
            let light =
                self.lights
                    .get_by_id(light_id)
                    .await?
                    .ok_or_else(|| NotFoundError {
                        entity: "Light",
                        id: light_id.to_string(),
                    })?;

            if rule.credit.extends(light.credit) {
                self.lights.update_credit(light_id, rule.credit).await?;
                PlannedCommand::On {
                    label: light.label,
                    color,
                }
            } else if rule.credit == Credit::OFF {
                self.lights.update_credit(light_id, Credit::OFF).await?;
                PlannedCommand::Off { label: light.label }
            } else {
                tracing::debug!(
                    light = %light_id,
                    banked = %light.credit,
                    offered = %rule.credit,
                    "keeping larger banked credit"
                );
                PlannedCommand::None
            }
        };

        match planned {
            PlannedCommand::On { label, color } => {
                self.command_on(&label, color).await;
                Ok(())
            }
            PlannedCommand::Off { label } => {
                // Already-off is an acceptable terminal state; no retry.
                if let Err(err) = self.control.turn_off(&label).await {
                    tracing::warn!(%err, %label, "turn-off command failed, leaving device as-is");
                }
                Ok(())
            }
            PlannedCommand::None => Ok(()),
        }
    }

    /// Command color + power-on, retrying once on transient failure.
    /// The credit is already persisted; device failure is logged, not fatal.
    async fn command_on(&self, label: &str, color: LightColor) {
        if let Err(err) = self.try_command_on(label, color).await {
            tracing::warn!(%err, %label, "light command failed, retrying once");
            if let Err(err) = self.try_command_on(label, color).await {
                tracing::warn!(%err, %label, "light command failed after retry, giving up");
            }
        }
    }

    async fn try_command_on(&self, label: &str, color: LightColor) -> Result<(), LumenError> {
        self.control.set_color(label, color, COLOR_FADE).await?;
        self.control.turn_on(label).await
    }

    /// One decay pass over every persisted light.
    ///
    /// Each light's credit loses a minute (the forever sentinel and zero
    /// are untouched); the tick that crosses a credit to zero turns the
    /// device off, tolerating failure. Per-light failures are logged and
    /// do not stop the pass.
    ///
    /// # Errors
    ///
    /// Returns a storage error if listing the lights fails.
    pub async fn decay_tick(&self) -> Result<(), LumenError> {
        for light in self.lights.get_all().await? {
            if let Err(err) = self.decay_light(light.id).await {
                tracing::warn!(%err, light = %light.id, "credit decay failed");
            }
        }
        Ok(())
    }

    async fn decay_light(&self, id: LightId) -> Result<(), LumenError> {
        let expired_label = {
            let _guard = self.locks.acquire(id).await;
            // Re-read under the lock; a rule resolution may have run since
            // the pass listed the lights.
            let Some(light) = self.lights.get_by_id(id).await? else {
                return Ok(());
            };
            let decayed = light.credit.decay();
            if decayed == light.credit {
                return Ok(());
            }
            self.lights.update_credit(id, decayed).await?;
            (decayed == Credit::OFF).then_some(light.label)
        };

        if let Some(label) = expired_label {
            tracing::info!(%label, "credit expired, turning light off");
            if let Err(err) = self.control.turn_off(&label).await {
                tracing::warn!(%err, %label, "turn-off after credit expiry failed");
            }
        }
        Ok(())
    }
}
