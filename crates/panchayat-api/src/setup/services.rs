//! Wiring of repositories and services into [`AppState`]

use crate::state::AppState;
use panchayat_core::Config;
use panchayat_db::{AdminRepository, ContentRepository};
use panchayat_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

/// Build the application state on top of a connected pool and blob store.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Arc<AppState> {
    let content_store = Arc::new(ContentRepository::new(pool.clone()));
    let admin_store = Arc::new(AdminRepository::new(pool));

    tracing::info!(
        max_file_size_mb = config.max_file_size_bytes() / 1024 / 1024,
        max_files_per_request = config.max_files_per_request(),
        "Services initialized"
    );

    Arc::new(AppState::new(
        config.clone(),
        content_store,
        admin_store,
        storage,
    ))
}
