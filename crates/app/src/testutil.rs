//! In-memory port implementations shared by the app-layer tests.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use lumen_domain::color::LightColor;
use lumen_domain::credit::Credit;
use lumen_domain::error::LumenError;
use lumen_domain::id::{CallbackId, LightId, ProfileId, RuleId};
use lumen_domain::light::Light;
use lumen_domain::profile::Profile;
use lumen_domain::rule::{Rule, RuleDraft};

use crate::ports::{LightControl, LightRepository, ProfileStore, RuleRepository};

// ── In-memory light repo ───────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryLightRepo {
    store: Mutex<HashMap<LightId, Light>>,
    next_id: AtomicI64,
    fail_updates: AtomicUsize,
}

impl InMemoryLightRepo {
    /// Make the next `n` credit writes fail with a storage error. Failed
    /// writes leave the stored credit untouched.
    pub fn fail_next_update(&self, n: usize) {
        self.fail_updates.store(n, Ordering::SeqCst);
    }

    fn take_update_failure(&self) -> Result<(), LumenError> {
        let remaining = self.fail_updates.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_updates.store(remaining - 1, Ordering::SeqCst);
            return Err(LumenError::Storage("injected storage failure".into()));
        }
        Ok(())
    }
}

impl LightRepository for InMemoryLightRepo {
    fn create(&self, label: &str) -> impl Future<Output = Result<Light, LumenError>> + Send {
        let id = LightId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let light = Light::new(id, label);
        self.store.lock().unwrap().insert(id, light.clone());
        async { Ok(light) }
    }

    fn get_by_id(
        &self,
        id: LightId,
    ) -> impl Future<Output = Result<Option<Light>, LumenError>> + Send {
        let r = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(r) }
    }

    fn get_by_label(
        &self,
        label: &str,
    ) -> impl Future<Output = Result<Option<Light>, LumenError>> + Send {
        let r = self
            .store
            .lock()
            .unwrap()
            .values()
            .find(|l| l.label == label)
            .cloned();
        async { Ok(r) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Light>, LumenError>> + Send {
        let mut r: Vec<_> = self.store.lock().unwrap().values().cloned().collect();
        r.sort_by_key(|l| l.id);
        async { Ok(r) }
    }

    fn update_credit(
        &self,
        id: LightId,
        credit: Credit,
    ) -> impl Future<Output = Result<(), LumenError>> + Send {
        let r = self.take_update_failure().map(|()| {
            if let Some(light) = self.store.lock().unwrap().get_mut(&id) {
                light.credit = credit;
            }
        });
        async { r }
    }

    fn delete(&self, id: LightId) -> impl Future<Output = Result<(), LumenError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }
}

// ── In-memory rule repo with association tables ────────────────────

#[derive(Default)]
pub struct InMemoryRuleRepo {
    rules: Mutex<HashMap<RuleId, Rule>>,
    rule_lights: Mutex<HashMap<RuleId, Vec<LightId>>>,
    rule_profiles: Mutex<HashMap<RuleId, HashSet<ProfileId>>>,
    rule_callbacks: Mutex<HashMap<RuleId, HashSet<CallbackId>>>,
    next_id: AtomicI64,
}

impl RuleRepository for InMemoryRuleRepo {
    fn create(
        &self,
        draft: RuleDraft,
        lights: &[LightId],
        callbacks: &[CallbackId],
    ) -> impl Future<Output = Result<Rule, LumenError>> + Send {
        let id = RuleId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let rule = Rule::from_draft(id, draft);
        self.rules.lock().unwrap().insert(id, rule.clone());
        self.rule_lights.lock().unwrap().insert(id, lights.to_vec());
        self.rule_callbacks
            .lock()
            .unwrap()
            .insert(id, callbacks.iter().copied().collect());
        async { Ok(rule) }
    }

    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, LumenError>> + Send {
        let r = self.rules.lock().unwrap().get(&id).cloned();
        async { Ok(r) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, LumenError>> + Send {
        let mut r: Vec<_> = self.rules.lock().unwrap().values().cloned().collect();
        r.sort_by_key(|rule| rule.id);
        async { Ok(r) }
    }

    fn delete(&self, id: RuleId) -> impl Future<Output = Result<(), LumenError>> + Send {
        self.rules.lock().unwrap().remove(&id);
        self.rule_lights.lock().unwrap().remove(&id);
        self.rule_profiles.lock().unwrap().remove(&id);
        self.rule_callbacks.lock().unwrap().remove(&id);
        async { Ok(()) }
    }

    fn lights_for(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Vec<LightId>, LumenError>> + Send {
        let r = self
            .rule_lights
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default();
        async { Ok(r) }
    }

    fn candidates(
        &self,
        profile: ProfileId,
        callback: CallbackId,
    ) -> impl Future<Output = Result<Vec<RuleId>, LumenError>> + Send {
        let profiles = self.rule_profiles.lock().unwrap();
        let callbacks = self.rule_callbacks.lock().unwrap();
        let mut r: Vec<_> = self
            .rules
            .lock()
            .unwrap()
            .keys()
            .filter(|id| profiles.get(id).is_some_and(|p| p.contains(&profile)))
            .filter(|id| callbacks.get(id).is_some_and(|c| c.contains(&callback)))
            .copied()
            .collect();
        r.sort();
        async { Ok(r) }
    }

    fn rules_for_profile(
        &self,
        profile: ProfileId,
    ) -> impl Future<Output = Result<Vec<Rule>, LumenError>> + Send {
        let profiles = self.rule_profiles.lock().unwrap();
        let mut r: Vec<_> = self
            .rules
            .lock()
            .unwrap()
            .values()
            .filter(|rule| {
                profiles
                    .get(&rule.id)
                    .is_some_and(|p| p.contains(&profile))
            })
            .cloned()
            .collect();
        r.sort_by_key(|rule| rule.id);
        async { Ok(r) }
    }

    fn rules_outside_profile(
        &self,
        profile: ProfileId,
    ) -> impl Future<Output = Result<Vec<Rule>, LumenError>> + Send {
        let profiles = self.rule_profiles.lock().unwrap();
        let mut r: Vec<_> = self
            .rules
            .lock()
            .unwrap()
            .values()
            .filter(|rule| {
                !profiles
                    .get(&rule.id)
                    .is_some_and(|p| p.contains(&profile))
            })
            .cloned()
            .collect();
        r.sort_by_key(|rule| rule.id);
        async { Ok(r) }
    }

    fn set_profile_rules(
        &self,
        profile: ProfileId,
        rules: &[RuleId],
    ) -> impl Future<Output = Result<(), LumenError>> + Send {
        let mut profiles = self.rule_profiles.lock().unwrap();
        for set in profiles.values_mut() {
            set.remove(&profile);
        }
        for rule in rules {
            profiles.entry(*rule).or_default().insert(profile);
        }
        async { Ok(()) }
    }
}

// ── In-memory profile store ────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryProfileStore {
    store: Mutex<HashMap<ProfileId, Profile>>,
    active: Mutex<Option<ProfileId>>,
    next_id: AtomicI64,
}

impl ProfileStore for InMemoryProfileStore {
    fn create(&self, name: &str) -> impl Future<Output = Result<Profile, LumenError>> + Send {
        let id = ProfileId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let profile = Profile::new(id, name);
        self.store.lock().unwrap().insert(id, profile.clone());
        async { Ok(profile) }
    }

    fn get_by_id(
        &self,
        id: ProfileId,
    ) -> impl Future<Output = Result<Option<Profile>, LumenError>> + Send {
        let r = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(r) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Profile>, LumenError>> + Send {
        let mut r: Vec<_> = self.store.lock().unwrap().values().cloned().collect();
        r.sort_by_key(|p| p.id);
        async { Ok(r) }
    }

    fn delete(&self, id: ProfileId) -> impl Future<Output = Result<(), LumenError>> + Send {
        self.store.lock().unwrap().remove(&id);
        let mut active = self.active.lock().unwrap();
        if *active == Some(id) {
            *active = None;
        }
        async { Ok(()) }
    }

    fn active_profile(
        &self,
    ) -> impl Future<Output = Result<Option<ProfileId>, LumenError>> + Send {
        let r = *self.active.lock().unwrap();
        async move { Ok(r) }
    }

    fn set_active_profile(
        &self,
        profile: Option<ProfileId>,
    ) -> impl Future<Output = Result<(), LumenError>> + Send {
        *self.active.lock().unwrap() = profile;
        async { Ok(()) }
    }
}

// ── Recording light control with failure injection ─────────────────

/// A device command as seen by the control port, recorded in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Discover,
    SetColor {
        label: String,
        color: LightColor,
        fade: Duration,
    },
    TurnOn {
        label: String,
    },
    TurnOff {
        label: String,
    },
}

/// Light control double that records every attempted command and can be
/// told to fail the next `n` commands.
#[derive(Default)]
pub struct RecordingLightControl {
    labels: Mutex<Vec<String>>,
    commands: Mutex<Vec<Command>>,
    fail_remaining: AtomicUsize,
}

impl RecordingLightControl {
    pub fn with_labels(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            labels: Mutex::new(labels.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Make the next `n` commands fail with a device error.
    pub fn fail_next(&self, n: usize) {
        self.fail_remaining.store(n, Ordering::SeqCst);
    }

    /// Every command attempted so far, in order, including failed ones.
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    fn attempt(&self, command: Command) -> Result<(), LumenError> {
        self.commands.lock().unwrap().push(command);
        let remaining = self.fail_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(LumenError::Device("injected device failure".into()));
        }
        Ok(())
    }
}

impl LightControl for RecordingLightControl {
    fn discover(&self) -> impl Future<Output = Result<Vec<String>, LumenError>> + Send {
        let r = self
            .attempt(Command::Discover)
            .map(|()| self.labels.lock().unwrap().clone());
        async { r }
    }

    fn set_color(
        &self,
        label: &str,
        color: LightColor,
        fade: Duration,
    ) -> impl Future<Output = Result<(), LumenError>> + Send {
        let r = self.attempt(Command::SetColor {
            label: label.to_string(),
            color,
            fade,
        });
        async { r }
    }

    fn turn_on(&self, label: &str) -> impl Future<Output = Result<(), LumenError>> + Send {
        let r = self.attempt(Command::TurnOn {
            label: label.to_string(),
        });
        async { r }
    }

    fn turn_off(&self, label: &str) -> impl Future<Output = Result<(), LumenError>> + Send {
        let r = self.attempt(Command::TurnOff {
            label: label.to_string(),
        });
        async { r }
    }
}
