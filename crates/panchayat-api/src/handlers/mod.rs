pub mod auth;
pub mod content;
pub mod public_file;
pub mod upload;
