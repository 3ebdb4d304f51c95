//! Application state and sub-state extractors.
//!
//! Handlers take `State<Arc<AppState>>`; [`AuthState`] is also reachable on
//! its own through `FromRef` so extractors can ask for just that.

use axum::extract::FromRef;
use panchayat_core::Config;
use panchayat_db::{AdminStore, ContentStore};
use panchayat_storage::Storage;
use std::sync::Arc;

use crate::auth::{AuthState, JwtService};
use crate::services::{ContentService, UploadService};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub content: ContentService,
    pub uploads: UploadService,
    pub auth: Arc<AuthState>,
}

impl AppState {
    pub fn new(
        config: Config,
        content_store: Arc<dyn ContentStore>,
        admin_store: Arc<dyn AdminStore>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        let uploads = UploadService::new(storage, crate::utils::upload::UploadLimits {
            max_file_size: config.max_file_size_bytes(),
            max_files: config.max_files_per_request(),
        });
        let jwt = Arc::new(JwtService::new(config.jwt_secret(), config.jwt_expiry_hours()));
        let auth = Arc::new(AuthState {
            jwt,
            admins: admin_store,
        });

        Self {
            content: ContentService::new(content_store, uploads.clone()),
            uploads,
            auth,
            config,
        }
    }

    pub fn content_store(&self) -> &Arc<dyn ContentStore> {
        self.content.store()
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        self.uploads.storage()
    }
}

impl FromRef<Arc<AppState>> for AuthState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.auth.as_ref().clone()
    }
}
