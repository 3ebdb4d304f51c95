//! Serves stored blobs at `/uploads/{name}` without authentication.

use crate::constants::UPLOAD_CACHE_CONTROL;
use crate::error::{storage_error_to_app, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use panchayat_core::AppError;
use panchayat_storage::{content_type_for_key, StorageError};
use std::sync::Arc;

#[tracing::instrument(skip(state), fields(operation = "get_upload"))]
pub async fn get_upload(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, HttpAppError> {
    let data = match state.storage().download(&name).await {
        Ok(data) => data,
        // Unknown and malformed names both read as a missing file.
        Err(StorageError::NotFound(_)) | Err(StorageError::InvalidKey(_)) => {
            return Err(AppError::NotFound("File not found".to_string()).into());
        }
        Err(e) => {
            tracing::error!(error = %e, key = %name, "Failed to read stored file");
            return Err(storage_error_to_app(e).into());
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for_key(&name))
        .header(header::CACHE_CONTROL, UPLOAD_CACHE_CONTROL)
        .body(Body::from(data))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })
}
