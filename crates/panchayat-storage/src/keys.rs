//! Shared key generation for storage backends.
//!
//! Key format: `{uuid}.{ext}`, where `ext` comes from the uploaded file name.

use uuid::Uuid;

const DEFAULT_EXTENSION: &str = "jpg";
const MAX_EXTENSION_LEN: usize = 10;

/// Extension to store a blob under: the lower-cased text after the last `.`
/// of the original name, or `jpg` when there is none or it is not a plain
/// alphanumeric token.
pub fn extension_for(original_filename: &str) -> String {
    original_filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Generate a fresh blob key for an uploaded file.
pub fn generate_blob_key(original_filename: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), extension_for(original_filename))
}

/// Recover the blob key from a stored media URL (or a bare key).
///
/// The key is the last path segment with any query or fragment removed.
pub fn key_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let key = path.rsplit('/').next().unwrap_or_default();
    if key.is_empty() || key == "." || key == ".." {
        None
    } else {
        Some(key.to_string())
    }
}

/// MIME type for serving a stored blob, derived from its extension.
pub fn content_type_for_key(key: &str) -> &'static str {
    let ext = key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_last_dot() {
        assert_eq!(extension_for("photo.final.PNG"), "png");
        assert_eq!(extension_for("noext"), "jpg");
        assert_eq!(extension_for("trailing."), "jpg");
        assert_eq!(extension_for("weird.p/ng"), "jpg");
    }

    #[test]
    fn test_generated_key_shape() {
        let key = generate_blob_key("meeting.webp");
        let (stem, ext) = key.rsplit_once('.').unwrap();
        assert_eq!(ext, "webp");
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn test_key_from_url() {
        assert_eq!(
            key_from_url("/uploads/abc.jpg").as_deref(),
            Some("abc.jpg")
        );
        assert_eq!(
            key_from_url("http://host/uploads/abc.jpg?v=2").as_deref(),
            Some("abc.jpg")
        );
        assert_eq!(key_from_url("abc.jpg").as_deref(), Some("abc.jpg"));
        assert_eq!(key_from_url("/uploads/"), None);
        assert_eq!(key_from_url("/uploads/.."), None);
    }

    #[test]
    fn test_content_type_for_key() {
        assert_eq!(content_type_for_key("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for_key("a.webp"), "image/webp");
        assert_eq!(content_type_for_key("a"), "application/octet-stream");
    }
}
