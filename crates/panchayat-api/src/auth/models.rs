use crate::error::HttpAppError;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use panchayat_core::{AdminProfile, AppError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::middleware::{bearer_token, AuthState};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: Uuid, // admin id
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated admin, stored in request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    pub id: Uuid,
    pub username: String,
}

impl From<AdminClaims> for AdminContext {
    fn from(claims: AdminClaims) -> Self {
        AdminContext {
            id: claims.sub,
            username: claims.username,
        }
    }
}

impl From<&AdminContext> for AdminProfile {
    fn from(ctx: &AdminContext) -> Self {
        AdminProfile {
            id: ctx.id,
            username: ctx.username.clone(),
        }
    }
}

// Extracted from parts so it works alongside Multipart bodies.
impl<S> FromRequestParts<S> for AdminContext
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminContext>()
            .cloned()
            .ok_or_else(|| HttpAppError(AppError::Unauthorized("Access token required".to_string())))
    }
}

/// Admin identity for routes open to everyone.
///
/// Holds `Some` only when the bearer token verifies; a missing or bad token
/// is treated as an anonymous caller rather than rejected.
#[derive(Debug, Clone)]
pub struct OptionalAdmin(pub Option<AdminContext>);

impl OptionalAdmin {
    pub fn is_admin(&self) -> bool {
        self.0.is_some()
    }
}

impl<S> FromRequestParts<S> for OptionalAdmin
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(OptionalAdmin(None));
        };

        let auth = AuthState::from_ref(state);
        match auth.jwt.verify(token) {
            Ok(claims) => Ok(OptionalAdmin(Some(claims.into()))),
            Err(_) => {
                tracing::debug!("Ignoring invalid bearer token on public route");
                Ok(OptionalAdmin(None))
            }
        }
    }
}
