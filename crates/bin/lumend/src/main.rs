//! # lumend — lumen daemon
//!
//! Composition root that wires the adapters together and runs the engine.
//!
//! ## Responsibilities
//! - Load configuration (`lumen.toml` + env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Import discovered bulbs into the light registry
//! - Start the callback intake and the decay ticker
//! - Handle graceful shutdown (SIGINT)
//!
//! The callback bus held here is the seam where the host platform's event
//! dispatch plugs in; nothing inside this process publishes to it.
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use lumen_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteLightRepository, SqliteProfileStore, SqliteRuleRepository,
};
use lumen_adapter_virtual::VirtualLightControl;
use lumen_app::callback_bus::CallbackBus;
use lumen_app::decay::DecayTicker;
use lumen_app::engine::LightingEngine;
use lumen_app::intake::CallbackIntake;
use lumen_app::services::light_service::LightService;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Device backend, shared between the engine and the light service
    let control = Arc::new(VirtualLightControl::with_labels(
        config.lights.labels.iter().cloned(),
    ));

    // Register every discovered bulb that isn't in the store yet
    let light_service = LightService::new(
        SqliteLightRepository::new(pool.clone()),
        Arc::clone(&control),
    );
    let imported = light_service.import_discovered().await?;
    tracing::info!(count = imported.len(), "imported discovered lights");

    // Engine
    let engine = Arc::new(LightingEngine::new(
        SqliteRuleRepository::new(pool.clone()),
        SqliteLightRepository::new(pool.clone()),
        SqliteProfileStore::new(pool),
        Arc::clone(&control),
    ));

    // Background tasks
    let bus = CallbackBus::new(256);
    let intake = CallbackIntake::start(Arc::clone(&engine), bus.subscribe());
    let decay = DecayTicker::start(
        Arc::clone(&engine),
        Duration::from_secs(config.decay.period_secs),
    );

    tracing::info!(
        decay_period_secs = config.decay.period_secs,
        "lumend running"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    intake.abort();
    decay.abort();

    Ok(())
}
