//! Light control port — the opaque device command boundary.
//!
//! The physical protocol behind this trait is not the core's concern;
//! bulbs are addressed purely by device label. Commands are external IO
//! and may block or time out — callers must never hold a light's credit
//! lock across one of these calls.

use std::future::Future;
use std::time::Duration;

use lumen_domain::color::LightColor;
use lumen_domain::error::LumenError;

/// Commands the core issues against physical (or simulated) bulbs.
pub trait LightControl {
    /// Discover the labels of all currently addressable lights.
    fn discover(&self) -> impl Future<Output = Result<Vec<String>, LumenError>> + Send;

    /// Fade the labeled bulb to `color` over `fade`.
    fn set_color(
        &self,
        label: &str,
        color: LightColor,
        fade: Duration,
    ) -> impl Future<Output = Result<(), LumenError>> + Send;

    /// Power the labeled bulb on.
    fn turn_on(&self, label: &str) -> impl Future<Output = Result<(), LumenError>> + Send;

    /// Power the labeled bulb off.
    fn turn_off(&self, label: &str) -> impl Future<Output = Result<(), LumenError>> + Send;
}

// A shared handle to a device backend is itself a backend, so the same
// fleet can serve both the engine and the administrative services.
impl<T> LightControl for std::sync::Arc<T>
where
    T: LightControl + Send + Sync,
{
    fn discover(&self) -> impl Future<Output = Result<Vec<String>, LumenError>> + Send {
        T::discover(self)
    }

    fn set_color(
        &self,
        label: &str,
        color: LightColor,
        fade: Duration,
    ) -> impl Future<Output = Result<(), LumenError>> + Send {
        T::set_color(self, label, color, fade)
    }

    fn turn_on(&self, label: &str) -> impl Future<Output = Result<(), LumenError>> + Send {
        T::turn_on(self, label)
    }

    fn turn_off(&self, label: &str) -> impl Future<Output = Result<(), LumenError>> + Send {
        T::turn_off(self, label)
    }
}
