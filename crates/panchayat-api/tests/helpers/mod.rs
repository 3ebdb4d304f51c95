//! Test helpers: build AppState and router for integration tests.
//!
//! The stores are the in-memory ones from `panchayat-db` and blobs go to a
//! temporary directory, so these tests need neither Postgres nor Docker.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;

use axum_test::TestServer;
use panchayat_api::setup::routes;
use panchayat_api::AppState;
use panchayat_core::{BaseConfig, Config, ContentServiceConfig};
use panchayat_db::{InMemoryAdminStore, InMemoryContentStore};
use panchayat_storage::{key_from_url, LocalStorage, Storage};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

/// Test application: server plus handles on everything behind it.
pub struct TestApp {
    pub server: TestServer,
    pub content: InMemoryContentStore,
    pub admins: InMemoryAdminStore,
    pub storage: Arc<LocalStorage>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of blobs currently in the upload directory.
    pub fn blob_count(&self) -> usize {
        std::fs::read_dir(self.storage.base_path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    pub async fn blob_exists(&self, url: &str) -> bool {
        match key_from_url(url) {
            Some(key) => self.storage.exists(&key).await.unwrap_or(false),
            None => false,
        }
    }
}

pub fn create_test_config(upload_dir: PathBuf) -> Config {
    Config(Box::new(ContentServiceConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 5,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            jwt_expiry_hours: 1,
            request_timeout_secs: 30,
            environment: "test".to_string(),
            log_format: "pretty".to_string(),
        },
        database_url: "postgres://unused/test".to_string(),
        upload_dir,
        uploads_url_prefix: "/uploads".to_string(),
        max_file_size_bytes: 1024 * 1024,
        max_files_per_request: 3,
    }))
}

/// Setup test app with in-memory stores and local storage in a temp dir.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(temp_dir.path().to_path_buf());

    let storage = Arc::new(
        LocalStorage::new(temp_dir.path(), "/uploads".to_string())
            .await
            .expect("Failed to create local storage"),
    );
    let content = InMemoryContentStore::new();
    let admins = InMemoryAdminStore::new();

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(content.clone()),
        Arc::new(admins.clone()),
        storage.clone(),
    ));
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        content,
        admins,
        storage,
        _temp_dir: temp_dir,
    }
}
