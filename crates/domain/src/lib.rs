//! # lumen-domain
//!
//! Pure domain model for the lumen rule-driven lighting controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Credit** model (time-to-live counter on a light)
//! - Define **Schedules** (time-of-day windows, including overnight wrap)
//! - Define **Colors** (symbolic rule colors and their concrete resolution)
//! - Define **Lights**, **Rules**, and **Profiles**
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod color;
pub mod credit;
pub mod light;
pub mod profile;
pub mod rule;
pub mod schedule;
