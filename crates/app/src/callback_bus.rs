//! In-process callback bus backed by a tokio broadcast channel.
//!
//! The host platform's dispatcher publishes one [`CallbackEvent`] per
//! sensor/module event; the engine's intake subscribes and spawns a
//! resolution task per event. The payload is carried along opaquely and
//! never inspected by the core.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use lumen_domain::id::CallbackId;
use lumen_domain::time::{Timestamp, now};

/// A sensor/module event delivered by the host platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackEvent {
    /// Which registered callback fired.
    pub callback: CallbackId,
    /// Opaque payload from the originating module.
    pub payload: serde_json::Value,
    /// When the event entered the bus.
    pub received_at: Timestamp,
}

impl CallbackEvent {
    #[must_use]
    pub fn new(callback: CallbackId, payload: serde_json::Value) -> Self {
        Self {
            callback,
            payload,
            received_at: now(),
        }
    }
}

/// In-process callback bus.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct CallbackBus {
    sender: broadcast::Sender<CallbackEvent>,
}

impl CallbackBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to callback events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CallbackEvent> {
        self.sender.subscribe()
    }

    /// Publish a callback event, fire-and-forget.
    pub fn publish(&self, event: CallbackEvent) {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — the event is simply dropped.
        let _ = self.sender.send(event);
    }
}
