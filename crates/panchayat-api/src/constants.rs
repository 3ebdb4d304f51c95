//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Headers that keep browsers and proxies from caching content responses.
pub const NO_CACHE_HEADERS: [(&str, &str); 3] = [
    ("Cache-Control", "no-store, no-cache, must-revalidate, proxy-revalidate"),
    ("Pragma", "no-cache"),
    ("Expires", "0"),
];

/// Blob URLs never change content, so served files are cached for a year.
pub const UPLOAD_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
