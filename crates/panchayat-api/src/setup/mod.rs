//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded [`Config`] to a running
//! router, split so tests can build the router without Postgres.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use panchayat_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let state = services::initialize_services(&config, pool, storage);
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
