//! # lumen-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `lumen-app::ports::storage`
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `lumen-app` (for port traits) and `lumen-domain` (for domain
//! types). The `app` and `domain` crates must never reference this adapter.

mod error;
mod light_repo;
mod pool;
mod profile_store;
mod rule_repo;

pub use error::StorageError;
pub use light_repo::SqliteLightRepository;
pub use pool::{Config, Database};
pub use profile_store::SqliteProfileStore;
pub use rule_repo::SqliteRuleRepository;
