//! # lumen-adapter-virtual
//!
//! Virtual light control adapter — simulated bulbs for testing and for
//! running the daemon without any hardware on the network.
//!
//! Every bulb is a labeled in-memory record of power state and last color.
//! Commands are appended to a log so tests can assert on exactly what the
//! engine asked for, and failures can be injected to exercise retry paths.
//!
//! ## Dependency rule
//!
//! Depends on `lumen-app` (port traits) and `lumen-domain` only.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lumen_app::ports::LightControl;
use lumen_domain::color::LightColor;
use lumen_domain::error::{LumenError, NotFoundError};

/// State of a single simulated bulb.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bulb {
    /// Whether the bulb is powered.
    pub powered: bool,
    /// Last color the bulb was faded to, if any.
    pub color: Option<LightColor>,
}

/// A command received by the simulated fleet, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum BulbCommand {
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

#[derive(Default)]
struct Fleet {
    bulbs: HashMap<String, Bulb>,
    log: Vec<BulbCommand>,
}

/// In-memory [`LightControl`] implementation.
#[derive(Default)]
pub struct VirtualLightControl {
    fleet: Mutex<Fleet>,
    fail_remaining: AtomicUsize,
}

impl VirtualLightControl {
    /// Create a fleet with the given bulb labels, all powered off.
    #[must_use]
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bulbs = labels
            .into_iter()
            .map(|label| (label.into(), Bulb::default()))
            .collect();

        Self {
            fleet: Mutex::new(Fleet {
                bulbs,
                log: Vec::new(),
            }),
            fail_remaining: AtomicUsize::new(0),
        }
    }

    /// Make the next `count` commands fail with a device error.
    ///
    /// Each failing command is still logged.
    pub fn fail_next(&self, count: usize) {
        self.fail_remaining.store(count, Ordering::SeqCst);
    }

    /// Snapshot the state of the labeled bulb, if it exists.
    #[must_use]
    pub fn bulb(&self, label: &str) -> Option<Bulb> {
        self.lock().bulbs.get(label).copied()
    }

    /// Snapshot the command log.
    #[must_use]
    pub fn commands(&self) -> Vec<BulbCommand> {
        self.lock().log.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Fleet> {
        self.fleet.lock().expect("virtual fleet lock poisoned")
    }

    fn take_failure(&self) -> Result<(), LumenError> {
        let injected = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok();
        if injected {
            Err(LumenError::Device("injected device failure".into()))
        } else {
            Ok(())
        }
    }

    fn unknown(label: &str) -> LumenError {
        NotFoundError {
            entity: "Light",
            id: label.to_string(),
        }
        .into()
    }
}

impl LightControl for VirtualLightControl {
    fn discover(&self) -> impl Future<Output = Result<Vec<String>, LumenError>> + Send {
        let result = (|| -> Result<Vec<String>, LumenError> {
            let mut fleet = self.lock();
            fleet.log.push(BulbCommand::Discover);
            self.take_failure()?;
            let mut labels: Vec<String> = fleet.bulbs.keys().cloned().collect();
            labels.sort();
            Ok(labels)
        })();
        async move { result }
    }

    fn set_color(
        &self,
        label: &str,
        color: LightColor,
        fade: Duration,
    ) -> impl Future<Output = Result<(), LumenError>> + Send {
        let result = (|| -> Result<(), LumenError> {
            let mut fleet = self.lock();
            fleet.log.push(BulbCommand::SetColor {
                label: label.to_string(),
                color,
                fade,
            });
            self.take_failure()?;
            let bulb = fleet
                .bulbs
                .get_mut(label)
                .ok_or_else(|| Self::unknown(label))?;
            bulb.color = Some(color);
            Ok(())
        })();
        async move { result }
    }

    fn turn_on(&self, label: &str) -> impl Future<Output = Result<(), LumenError>> + Send {
        let result = (|| -> Result<(), LumenError> {
            let mut fleet = self.lock();
            fleet.log.push(BulbCommand::TurnOn {
                label: label.to_string(),
            });
            self.take_failure()?;
            let bulb = fleet
                .bulbs
                .get_mut(label)
                .ok_or_else(|| Self::unknown(label))?;
            bulb.powered = true;
            Ok(())
        })();
        async move { result }
    }

    fn turn_off(&self, label: &str) -> impl Future<Output = Result<(), LumenError>> + Send {
        let result = (|| -> Result<(), LumenError> {
            let mut fleet = self.lock();
            fleet.log.push(BulbCommand::TurnOff {
                label: label.to_string(),
            });
            self.take_failure()?;
            let bulb = fleet
                .bulbs
                .get_mut(label)
                .ok_or_else(|| Self::unknown(label))?;
            bulb.powered = false;
            Ok(())
        })();
        async move { result }
    }
}
