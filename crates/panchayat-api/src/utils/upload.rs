//! Multipart parsing and upload checks shared by the content and upload handlers

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use panchayat_core::{AppError, ContentForm};

pub const IMAGE_ONLY_MESSAGE: &str = "Only image files are allowed (JPEG, PNG, GIF, WebP, etc.)";

/// A file part read from a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Per-request upload ceilings.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_file_size: usize,
    pub max_files: usize,
}

impl UploadLimits {
    fn too_large(&self) -> AppError {
        AppError::Upload(format!(
            "File too large. Maximum size is {}",
            format_size(self.max_file_size)
        ))
    }

    fn too_many(&self) -> AppError {
        AppError::Upload(format!(
            "Too many files. Maximum is {} files per request",
            self.max_files
        ))
    }
}

/// Human-readable size in the largest unit that keeps the value at least 1.
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    let (unit, label) = match bytes {
        b if b >= MB => (MB, "MB"),
        b if b >= KB => (KB, "KB"),
        _ => return format!("{} bytes", bytes),
    };
    if bytes % unit == 0 {
        format!("{}{}", bytes / unit, label)
    } else {
        format!("{:.1}{}", bytes as f64 / unit as f64, label)
    }
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Only `image/*` uploads are accepted.
pub fn validate_image_content_type(content_type: &str) -> Result<(), AppError> {
    let normalized = normalize_mime_type(content_type);
    match normalized.strip_prefix("image/") {
        Some(subtype) if !subtype.is_empty() => Ok(()),
        _ => Err(AppError::Upload(IMAGE_ONLY_MESSAGE.to_string())),
    }
}

fn multipart_error(err: MultipartError, limits: &UploadLimits) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        limits.too_large()
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Read a file part chunk by chunk, failing as soon as it passes the size limit.
async fn read_file_field(
    mut field: Field<'_>,
    limits: &UploadLimits,
) -> Result<Option<UploadedFile>, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut data = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, limits))?
    {
        if data.len() + chunk.len() > limits.max_file_size {
            return Err(limits.too_large());
        }
        data.extend_from_slice(&chunk);
    }

    // Browsers send an empty part when no file was picked.
    if file_name.is_empty() && data.is_empty() {
        return Ok(None);
    }

    validate_image_content_type(&content_type)?;

    Ok(Some(UploadedFile {
        file_name,
        content_type,
        data: data.freeze(),
    }))
}

/// Read a multipart body: parts named `file_field` become files, known text
/// fields fill a [`ContentForm`], anything else is ignored.
pub async fn read_multipart(
    multipart: &mut Multipart,
    file_field: &str,
    limits: &UploadLimits,
) -> Result<(ContentForm, Vec<UploadedFile>), AppError> {
    let mut form = ContentForm::default();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limits))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == file_field {
            if let Some(file) = read_file_field(field, limits).await? {
                if files.len() == limits.max_files {
                    return Err(limits.too_many());
                }
                files.push(file);
            }
            continue;
        }

        if field.file_name().is_some() {
            tracing::debug!(field = %name, "Ignoring unexpected file field");
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| multipart_error(e, limits))?;
        if !form.set_field(&name, value) {
            tracing::debug!(field = %name, "Ignoring unknown form field");
        }
    }

    Ok((form, files))
}
