use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::StoredFile;
use crate::state::AppState;
use crate::utils::upload::read_multipart;
use axum::{
    extract::{Multipart, State},
    Json,
};
use panchayat_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = StoredFile),
        (status = 400, description = "No file, not an image, or too large", body = ErrorResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, multipart), fields(admin_id = %admin.id, operation = "upload_single"))]
pub async fn upload_single(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    mut multipart: Multipart,
) -> Result<Json<StoredFile>, HttpAppError> {
    let (_, files) = read_multipart(&mut multipart, "file", state.uploads.limits()).await?;
    if files.len() > 1 {
        return Err(AppError::Upload("Only one file may be uploaded here".to_string()).into());
    }

    let stored = state.uploads.store_all(files).await?;
    let file = stored
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Upload("No file uploaded".to_string()))?;
    Ok(Json(file))
}

#[utoipa::path(
    post,
    path = "/api/upload/multiple",
    tag = "upload",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Files stored", body = Vec<StoredFile>),
        (status = 400, description = "No files, not images, too large or too many", body = ErrorResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, multipart), fields(admin_id = %admin.id, operation = "upload_multiple"))]
pub async fn upload_multiple(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    mut multipart: Multipart,
) -> Result<Json<Vec<StoredFile>>, HttpAppError> {
    let (_, files) = read_multipart(&mut multipart, "files", state.uploads.limits()).await?;
    if files.is_empty() {
        return Err(AppError::Upload("No files uploaded".to_string()).into());
    }

    let stored = state.uploads.store_all(files).await?;
    Ok(Json(stored))
}
