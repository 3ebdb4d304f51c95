//! Panchayat Storage Library
//!
//! Blob storage for content media. The [`Storage`] trait is what the content
//! service talks to; [`LocalStorage`] keeps blobs on the local filesystem and
//! hands out public URLs under a configurable prefix.
//!
//! # Key format
//!
//! A blob key is a flat file name, `{uuid}.{ext}`. Keys must not contain `..`,
//! a `/` or a leading `/`. Key generation lives in the `keys` module so every
//! backend produces the same names.

pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::{content_type_for_key, generate_blob_key, key_from_url};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
