//! Callback intake — bridges the callback bus to the engine.
//!
//! Subscribes to the bus and spawns one fire-and-forget task per incoming
//! event, so a slow resolution never backs up the originating dispatcher.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::callback_bus::CallbackEvent;
use crate::engine::LightingEngine;
use crate::ports::{LightControl, LightRepository, ProfileStore, RuleRepository};

/// Background consumer of [`CallbackEvent`]s.
pub struct CallbackIntake;

impl CallbackIntake {
    /// Spawn the intake task. It runs until the bus is dropped.
    pub fn start<RR, LR, PS, LC>(
        engine: Arc<LightingEngine<RR, LR, PS, LC>>,
        mut receiver: broadcast::Receiver<CallbackEvent>,
    ) -> JoinHandle<()>
    where
        RR: RuleRepository + Send + Sync + 'static,
        LR: LightRepository + Send + Sync + 'static,
        PS: ProfileStore + Send + Sync + 'static,
        LC: LightControl + Send + Sync + 'static,
    {
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        let engine = Arc::clone(&engine);
                        tokio::spawn(async move {
                            match engine.handle_callback(event.callback).await {
                                Ok(resolved) => tracing::debug!(
                                    callback = %event.callback,
                                    rules = resolved.len(),
                                    "callback processed"
                                ),
                                Err(err) => tracing::warn!(
                                    %err,
                                    callback = %event.callback,
                                    "callback processing failed"
                                ),
                            }
                        });
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "callback intake lagged, events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
