//! Panchayat data access layer
//!
//! Repository traits for content and admin records, their Postgres
//! implementations and the embedded schema migrations. In-memory stores are
//! available behind the `test-helpers` feature.

pub mod db;

pub use db::admin::AdminRepository;
pub use db::content::ContentRepository;
pub use db::{run_migrations, AdminStore, ContentStore, MIGRATOR};

#[cfg(feature = "test-helpers")]
pub use db::memory::{InMemoryAdminStore, InMemoryContentStore};
