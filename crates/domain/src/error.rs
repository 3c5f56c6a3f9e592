//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`LumenError`]
//! via `#[from]` or the boxed `Storage`/`Device` variants. Validation and
//! not-found are plain values; storage and device failures wrap whatever the
//! adapter produced.

/// Top-level error for the lumen core.
#[derive(Debug, thiserror::Error)]
pub enum LumenError {
    /// A domain invariant was violated by administrative input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The persistent store failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A light control command failed.
    #[error("device error")]
    Device(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations, rejected at the administrative boundary.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("light label must not be empty")]
    EmptyLabel,

    #[error("credit must be -1, 0, or a positive minute count, got {0}")]
    InvalidCredit(i64),

    #[error("time of day must be below 86400 seconds, got {0}")]
    InvalidTimeOfDay(u32),

    #[error("rule needs a time window")]
    MissingWindow,

    #[error("rule needs at least one light")]
    NoLights,

    #[error("rule needs at least one callback")]
    NoCallbacks,
}

/// A lookup by identifier found nothing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Light"`).
    pub entity: &'static str,
    /// The identifier that missed, rendered as text.
    pub id: String,
}
