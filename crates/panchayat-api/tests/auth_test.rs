//! Auth API integration tests.
//!
//! Run with: `cargo test -p panchayat-api --test auth_test`

mod helpers;

use helpers::auth::{admin_token, bearer, create_test_admin, TEST_PASSWORD, TEST_USERNAME};
use helpers::setup_test_app;
use serde_json::{json, Value};

#[tokio::test]
async fn test_login_returns_token_and_profile() {
    let app = setup_test_app().await;
    create_test_admin(&app).await;

    let response = app
        .client()
        .post("/api/auth/login")
        .json(&json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["username"], TEST_USERNAME);
    assert!(body["user"]["id"].is_string());
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = setup_test_app().await;
    create_test_admin(&app).await;

    for (username, password) in [(TEST_USERNAME, "wrong"), ("nobody", TEST_PASSWORD)] {
        let response = app
            .client()
            .post("/api/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .await;
        assert_eq!(response.status_code(), 401);
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/auth/login")
        .json(&json!({ "username": TEST_USERNAME }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Username and password are required");
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/auth/login")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_verify_token() {
    let app = setup_test_app().await;
    let token = admin_token(&app).await;

    let response = app
        .client()
        .get("/api/auth/verify")
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["username"], TEST_USERNAME);

    let response = app.client().get("/api/auth/verify").await;
    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"], "Access token required");
}
