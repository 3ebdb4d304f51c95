//! Panchayat Core Library
//!
//! Domain models, error types, configuration, validation and the content
//! visibility rules shared by every Panchayat component. Nothing in this crate
//! performs I/O apart from reading the environment in [`Config::from_env`].

pub mod config;
pub mod error;
pub mod models;
pub mod validation;
pub mod visibility;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ContentServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Admin, AdminProfile, Content, ContentForm, ContentType, MediaItem, MediaKind, NewContent};
pub use visibility::{Audience, ContentQuery};
