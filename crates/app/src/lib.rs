//! # lumen-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `LightRepository` — persisted lights and their credits
//!   - `RuleRepository` — rules and their light/profile/callback associations
//!   - `ProfileStore` — profiles plus the active-profile accessor pair
//!   - `LightControl` — the opaque device command port
//! - Host the **engine**: callback-driven rule selection, trigger gating,
//!   credit resolution, and the periodic decay ticker
//! - Provide **in-process infrastructure** that doesn't need IO: the
//!   callback bus and the per-light lock registry
//! - Provide administrative **services** (rule/profile/light management)
//!
//! ## Dependency rule
//! Depends on `lumen-domain` only (plus `tokio::sync`/`tokio::time` for
//! channels and timers). Never imports adapter crates. Adapters depend on
//! *this* crate, not the reverse.

pub mod callback_bus;
pub mod decay;
pub mod engine;
pub mod intake;
pub mod locks;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testutil;
