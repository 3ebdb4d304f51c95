use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use panchayat_core::AppError;
use panchayat_db::AdminStore;
use std::sync::Arc;

use super::jwt::JwtService;
use super::models::AdminContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<JwtService>,
    pub admins: Arc<dyn AdminStore>,
}

/// Token from an `Authorization: Bearer <token>` header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Reject requests without a valid admin token; otherwise attach [`AdminContext`].
pub async fn require_admin(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!(path = %request.uri().path(), "Missing bearer token");
        return HttpAppError(AppError::Unauthorized("Access token required".to_string()))
            .into_response();
    };

    let claims = match auth_state.jwt.verify(token) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    tracing::debug!(admin_id = %claims.sub, username = %claims.username, "Admin authenticated");
    request
        .extensions_mut()
        .insert(AdminContext::from(claims));
    next.run(request).await
}
