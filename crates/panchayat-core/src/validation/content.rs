//! Content field validation.
//!
//! Every check here runs before any blob is touched, so a rejected
//! submission leaves both the record and the blob store unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::AppError;
use crate::models::{Content, ContentForm, ContentType, MediaItem, NewContent};

pub const MSG_REQUIRED_FIELDS: &str = "Type, title, and description are required";
pub const MSG_INVALID_TYPE: &str = "Invalid content type";
pub const MSG_DATES_REQUIRED: &str = "Start date and end date are required for events";
pub const MSG_END_BEFORE_START: &str = "End date must be after or equal to start date";

/// Coerce a boolean-like form value. Only the literal `true` is true; any
/// other present value is false. `None` when the field was not sent.
pub fn parse_bool_like(raw: Option<&str>) -> Option<bool> {
    raw.map(|v| v.trim() == "true")
}

/// Parse a submitted date. Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]`
/// (taken as UTC) or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse the `existingMedia` JSON array. Absent, blank or malformed input
/// yields `None` and the caller picks the fallback.
pub fn parse_media_list(raw: Option<&str>) -> Option<Vec<MediaItem>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    serde_json::from_str(raw).ok()
}

pub fn validate_date_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(AppError::validation(MSG_END_BEFORE_START)),
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(AppError::validation(MSG_DATES_REQUIRED)),
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn submitted_date(raw: Option<&str>, label: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    match non_blank(raw) {
        None => Ok(None),
        Some(value) => parse_date(value)
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("Invalid {} date", label))),
    }
}

/// Validate a create submission. Media is left empty for the caller to fill.
pub fn validate_new_content(form: &ContentForm) -> Result<NewContent, AppError> {
    let (Some(raw_type), Some(title), Some(description)) = (
        non_blank(form.content_type.as_deref()),
        non_blank(form.title.as_deref()),
        non_blank(form.description.as_deref()),
    ) else {
        return Err(AppError::validation(MSG_REQUIRED_FIELDS));
    };

    let content_type: ContentType = raw_type
        .parse()
        .map_err(|_| AppError::validation(MSG_INVALID_TYPE))?;

    let (start_date, end_date) = if content_type.has_date_range() {
        let start = submitted_date(form.start_date.as_deref(), "start")?;
        let end = submitted_date(form.end_date.as_deref(), "end")?;
        let (start, end) = validate_date_range(start, end)?;
        (Some(start), Some(end))
    } else {
        (None, None)
    };

    Ok(NewContent {
        content_type,
        title: title.to_string(),
        description: description.to_string(),
        media: Vec::new(),
        start_date,
        end_date,
        is_active: parse_bool_like(form.is_active.as_deref()).unwrap_or(true),
    })
}

/// Merge an update submission into a copy of `current`.
///
/// Empty title/description keep the stored value, a whitespace-only one is
/// rejected. The type never changes. Event dates are replaced when sent and
/// the merged range is re-checked. Media and timestamps are not touched.
pub fn apply_update(current: &Content, form: &ContentForm) -> Result<Content, AppError> {
    let mut updated = current.clone();

    if let Some(title) = form.title.as_deref().filter(|t| !t.is_empty()) {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        updated.title = title.to_string();
    }

    if let Some(description) = form.description.as_deref().filter(|d| !d.is_empty()) {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::validation("Description is required"));
        }
        updated.description = description.to_string();
    }

    if let Some(is_active) = parse_bool_like(form.is_active.as_deref()) {
        updated.is_active = is_active;
    }

    if updated.content_type.has_date_range() {
        if let Some(start) = submitted_date(form.start_date.as_deref(), "start")? {
            updated.start_date = Some(start);
        }
        if let Some(end) = submitted_date(form.end_date.as_deref(), "end")? {
            updated.end_date = Some(end);
        }
        validate_date_range(updated.start_date, updated.end_date)?;
    } else {
        updated.start_date = None;
        updated.end_date = None;
    }

    Ok(updated)
}
