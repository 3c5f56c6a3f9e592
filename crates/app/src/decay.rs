//! Decay ticker — ages light credits on a fixed period.
//!
//! Runs independently of sensor activity: every period, each light's
//! credit loses a minute and lights that just crossed to zero are turned
//! off. The period is a deployment parameter, not a protocol constant.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::engine::LightingEngine;
use crate::ports::{LightControl, LightRepository, ProfileStore, RuleRepository};

/// Periodic driver for [`LightingEngine::decay_tick`].
pub struct DecayTicker;

impl DecayTicker {
    /// Spawn the background task. The first tick happens one full period
    /// after startup, so a restart never double-charges the lights.
    pub fn start<RR, LR, PS, LC>(
        engine: Arc<LightingEngine<RR, LR, PS, LC>>,
        period: Duration,
    ) -> JoinHandle<()>
    where
        RR: RuleRepository + Send + Sync + 'static,
        LR: LightRepository + Send + Sync + 'static,
        PS: ProfileStore + Send + Sync + 'static,
        LC: LightControl + Send + Sync + 'static,
    {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if let Err(err) = engine.decay_tick().await {
                    tracing::warn!(%err, "decay tick failed, retrying next period");
                }
            }
        })
    }
}
