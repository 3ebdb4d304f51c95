use crate::auth::password::verify_credentials;
use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use panchayat_core::{AdminProfile, AppError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: AdminProfile,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: AdminProfile,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing username or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpAppError> {
    let (username, password) = match (request.username, request.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(AppError::validation("Username and password are required").into());
        }
    };

    let admin = state.auth.admins.find_by_username(&username).await?;

    // Argon2 is deliberately slow; keep it off the async workers. Unknown
    // usernames still pay for one verification.
    let stored_hash = admin.as_ref().map(|a| a.password_hash.clone());
    let password_ok = tokio::task::spawn_blocking(move || {
        verify_credentials(&password, stored_hash.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?;

    let admin = match admin {
        Some(admin) if password_ok => admin,
        Some(_) => {
            tracing::info!(username = %username, "Login attempt with wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
        }
        None => {
            tracing::info!(username = %username, "Login attempt for unknown admin");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
        }
    };

    let user = AdminProfile::from(&admin);
    let token = state.auth.jwt.issue(&user)?;

    tracing::info!(admin_id = %user.id, "Admin logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "auth",
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state), fields(admin_id = %admin.id, operation = "verify_token"))]
pub async fn verify(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
) -> Result<Json<VerifyResponse>, HttpAppError> {
    // The token may outlive the account it was issued for.
    let account = state.auth.admins.get(admin.id).await?;
    let user = match account {
        Some(account) => AdminProfile::from(&account),
        None => {
            return Err(AppError::Unauthorized("Invalid or expired token".to_string()).into());
        }
    };

    Ok(Json(VerifyResponse { valid: true, user }))
}
