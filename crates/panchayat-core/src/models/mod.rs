//! Data models for the application
//!
//! Content records, their media references and admin accounts.

mod admin;
mod content;

pub use admin::{Admin, AdminProfile};
pub use content::{Content, ContentForm, ContentType, MediaItem, MediaKind, NewContent};
