use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of content record. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "content_type", rename_all = "UPPERCASE")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    Event,
    Achievement,
    Work,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Event => "EVENT",
            ContentType::Achievement => "ACHIEVEMENT",
            ContentType::Work => "WORK",
        }
    }

    /// Only events carry a date range.
    pub fn has_date_range(&self) -> bool {
        matches!(self, ContentType::Event)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EVENT" => Ok(ContentType::Event),
            "ACHIEVEMENT" => Ok(ContentType::Achievement),
            "WORK" => Ok(ContentType::Work),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

/// Reference to a blob attached to a content record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MediaItem {
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn image(url: impl Into<String>) -> Self {
        MediaItem {
            url: url.into(),
            kind: MediaKind::Image,
        }
    }
}

/// A stored content record.
///
/// Serialized with `_id` and camelCase field names, which is the shape the
/// admin and public pages consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: String,
    pub description: String,
    pub media: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content {
    pub fn media_urls(&self) -> impl Iterator<Item = &str> {
        self.media.iter().map(|m| m.url.as_str())
    }

    /// True when `now` falls inside the event window (inclusive at both ends).
    /// Records without a complete range are never inside a window.
    pub fn is_running_at(&self, now: DateTime<Utc>) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= now && now <= end,
            _ => false,
        }
    }
}

/// Validated input for a new record, media already resolved.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub content_type: ContentType,
    pub title: String,
    pub description: String,
    pub media: Vec<MediaItem>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl NewContent {
    /// Materialize the record with a fresh id and timestamps.
    pub fn into_content(self, now: DateTime<Utc>) -> Content {
        Content {
            id: Uuid::new_v4(),
            content_type: self.content_type,
            title: self.title,
            description: self.description,
            media: self.media,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Raw text fields of a create or update submission, as received.
///
/// Field names follow the multipart form: `type`, `title`, `description`,
/// `startDate`, `endDate`, `isActive` and `existingMedia` (a JSON array).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentForm {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_active: Option<String>,
    pub existing_media: Option<String>,
}

impl ContentForm {
    /// Record one named form field. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "type" => &mut self.content_type,
            "title" => &mut self.title,
            "description" => &mut self.description,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            "isActive" => &mut self.is_active,
            "existingMedia" => &mut self.existing_media,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(start: DateTime<Utc>, end: DateTime<Utc>) -> Content {
        NewContent {
            content_type: ContentType::Event,
            title: "Gram Sabha".into(),
            description: "Quarterly meeting".into(),
            media: vec![MediaItem::image("/uploads/a.jpg")],
            start_date: Some(start),
            end_date: Some(end),
            is_active: true,
        }
        .into_content(start)
    }

    #[test]
    fn test_serializes_with_frontend_field_names() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
        let value = serde_json::to_value(event(start, end)).unwrap();

        assert!(value.get("_id").is_some());
        assert_eq!(value["type"], "EVENT");
        assert_eq!(value["isActive"], true);
        assert!(value.get("startDate").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["media"][0]["type"], "image");
        assert_eq!(value["media"][0]["url"], "/uploads/a.jpg");
    }

    #[test]
    fn test_dates_omitted_when_absent() {
        let now = Utc::now();
        let content = NewContent {
            content_type: ContentType::Work,
            title: "Road".into(),
            description: "Paved".into(),
            media: vec![],
            start_date: None,
            end_date: None,
            is_active: true,
        }
        .into_content(now);
        let value = serde_json::to_value(content).unwrap();
        assert!(value.get("startDate").is_none());
        assert!(value.get("endDate").is_none());
    }

    #[test]
    fn test_window_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
        let content = event(start, end);
        assert!(content.is_running_at(start));
        assert!(content.is_running_at(end));
        assert!(!content.is_running_at(end + chrono::Duration::seconds(1)));
        assert!(!content.is_running_at(start - chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_content_type_parsing_is_exact() {
        assert_eq!("EVENT".parse::<ContentType>(), Ok(ContentType::Event));
        assert_eq!("WORK".parse::<ContentType>(), Ok(ContentType::Work));
        assert!("event".parse::<ContentType>().is_err());
        assert!("NEWS".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_media_kind_defaults_to_image() {
        let item: MediaItem = serde_json::from_str(r#"{"url":"/uploads/x.png"}"#).unwrap();
        assert_eq!(item.kind, MediaKind::Image);
    }

    #[test]
    fn test_form_set_field() {
        let mut form = ContentForm::default();
        assert!(form.set_field("startDate", "2025-01-01".into()));
        assert!(!form.set_field("files", "ignored".into()));
        assert_eq!(form.start_date.as_deref(), Some("2025-01-01"));
    }
}
