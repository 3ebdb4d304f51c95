use panchayat_api::auth::password::hash_password;
use panchayat_db::AdminStore;

use super::TestApp;

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Create the test admin directly in the store.
pub async fn create_test_admin(app: &TestApp) {
    let hash = hash_password(TEST_PASSWORD).expect("Failed to hash password");
    app.admins
        .create(TEST_USERNAME, &hash)
        .await
        .expect("Failed to create admin")
        .expect("Admin already exists");
}

/// Create the test admin and log in through the API; returns the bearer token.
pub async fn admin_token(app: &TestApp) -> String {
    create_test_admin(app).await;

    let response = app
        .client()
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "username": TEST_USERNAME,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("Expected 'token' in login response")
        .to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
