//! Application services — administrative use-cases over the ports.
//!
//! These are the validation boundary for everything an operator can do:
//! rule lifecycle, profile lifecycle and activation, light registration.
//! The HTTP layer that would call them lives outside this workspace.

pub mod light_service;
pub mod profile_service;
pub mod rule_service;

pub use light_service::LightService;
pub use profile_service::ProfileService;
pub use rule_service::RuleService;
