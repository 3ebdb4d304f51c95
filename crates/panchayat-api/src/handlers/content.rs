use crate::auth::{AdminContext, OptionalAdmin};
use crate::constants::NO_CACHE_HEADERS;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::read_multipart;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use panchayat_core::validation::MSG_INVALID_TYPE;
use panchayat_core::{AppError, Audience, Content, ContentType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::services::content::CONTENT_NOT_FOUND;

/// Multipart field carrying new files on create and update.
const FILES_FIELD: &str = "files";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListContentQuery {
    /// EVENT, ACHIEVEMENT or WORK
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Malformed ids are reported the same way as unknown ones.
fn parse_content_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(CONTENT_NOT_FOUND.to_string()))
}

#[utoipa::path(
    get,
    path = "/api/content",
    tag = "content",
    params(ListContentQuery),
    responses(
        (status = 200, description = "Content visible to the caller, newest first", body = Vec<Content>),
        (status = 400, description = "Unknown content type", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, admin), fields(is_admin = admin.is_admin(), operation = "list_content"))]
pub async fn list_content(
    State(state): State<Arc<AppState>>,
    admin: OptionalAdmin,
    Query(query): Query<ListContentQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let content_type = match query.content_type.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<ContentType>()
                .map_err(|_| AppError::validation(MSG_INVALID_TYPE))?,
        ),
    };
    let audience = if admin.is_admin() {
        Audience::Admin
    } else {
        Audience::Public
    };

    let items = state.content.list(content_type, audience).await?;
    tracing::debug!(count = items.len(), "Content listed");
    Ok((NO_CACHE_HEADERS, Json(items)))
}

#[utoipa::path(
    get,
    path = "/api/content/{id}",
    tag = "content",
    params(("id" = String, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content record", body = Content),
        (status = 404, description = "Content not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_content"))]
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = parse_content_id(&id)?;
    let content = state.content.get(id).await?;
    Ok((NO_CACHE_HEADERS, Json(content)))
}

#[utoipa::path(
    post,
    path = "/api/content",
    tag = "content",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Content created", body = Content),
        (status = 400, description = "Validation or upload error", body = ErrorResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, multipart), fields(admin_id = %admin.id, operation = "create_content"))]
pub async fn create_content(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (form, files) = read_multipart(&mut multipart, FILES_FIELD, state.uploads.limits()).await?;
    let content = state.content.create(form, files).await?;
    Ok((StatusCode::CREATED, Json(content)))
}

#[utoipa::path(
    put,
    path = "/api/content/{id}",
    tag = "content",
    params(("id" = String, Path, description = "Content ID")),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Content updated", body = Content),
        (status = 400, description = "Validation or upload error", body = ErrorResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, multipart), fields(admin_id = %admin.id, operation = "update_content"))]
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Content>, HttpAppError> {
    let id = parse_content_id(&id)?;
    let (form, files) = read_multipart(&mut multipart, FILES_FIELD, state.uploads.limits()).await?;
    let content = state.content.update(id, form, files).await?;
    Ok(Json(content))
}

#[utoipa::path(
    delete,
    path = "/api/content/{id}",
    tag = "content",
    params(("id" = String, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content deleted", body = MessageResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state), fields(admin_id = %admin.id, operation = "delete_content"))]
pub async fn delete_content(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    let id = parse_content_id(&id)?;
    state.content.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Content deleted successfully".to_string(),
    }))
}
