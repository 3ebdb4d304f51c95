//! Domain route groups (auth, content, uploads).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;

/// Routes anyone may call. The content listing still looks at the bearer
/// token to decide between the public and the admin view.
pub fn public_content_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/auth/login", API_PREFIX),
            post(handlers::auth::login),
        )
        .route(
            &format!("{}/content", API_PREFIX),
            get(handlers::content::list_content),
        )
        .route(
            &format!("{}/content/{{id}}", API_PREFIX),
            get(handlers::content::get_content),
        )
        .route("/uploads/{name}", get(handlers::public_file::get_upload))
}

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/auth/verify", API_PREFIX),
        get(handlers::auth::verify),
    )
}

pub fn content_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/content", API_PREFIX),
            post(handlers::content::create_content),
        )
        .route(
            &format!("{}/content/{{id}}", API_PREFIX),
            put(handlers::content::update_content)
                .delete(handlers::content::delete_content),
        )
}

pub fn upload_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/upload", API_PREFIX),
            post(handlers::upload::upload_single),
        )
        .route(
            &format!("{}/upload/multiple", API_PREFIX),
            post(handlers::upload::upload_multiple),
        )
}
