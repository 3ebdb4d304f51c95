//! Application services sitting between the HTTP handlers and the stores.

pub mod content;
pub mod upload;

pub use content::ContentService;
pub use upload::{DeleteReport, StoredFile, UploadService};
