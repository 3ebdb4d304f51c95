//! Test fixtures: image bytes, multipart parts and seeded records.

use axum_test::multipart::Part;
use chrono::{DateTime, Utc};
use panchayat_core::{Content, ContentType, MediaItem, NewContent};

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

pub fn png_part(file_name: &str) -> Part {
    Part::bytes(bytes::Bytes::from(create_minimal_png()))
        .file_name(file_name.to_string())
        .mime_type("image/png")
}

pub fn text_part(file_name: &str) -> Part {
    Part::bytes(bytes::Bytes::from_static(b"hello"))
        .file_name(file_name.to_string())
        .mime_type("text/plain")
}

pub fn record(
    content_type: ContentType,
    is_active: bool,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> Content {
    NewContent {
        content_type,
        title: format!("{} title", content_type),
        description: "Seeded".to_string(),
        media: Vec::<MediaItem>::new(),
        start_date: window.map(|(start, _)| start),
        end_date: window.map(|(_, end)| end),
        is_active,
    }
    .into_content(Utc::now())
}
