//! Admin account provisioning shared by the `panchayat-admin` binary.

use anyhow::Context;
use panchayat_api::auth::password::hash_password;
use panchayat_core::{Admin, AppError};
use panchayat_db::AdminStore;

pub const MIN_PASSWORD_LEN: usize = 8;

/// What `create_admin` did.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(Admin),
    AlreadyExists,
}

/// Reject usernames and passwords that should never reach the database.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::validation("Username must not be empty"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Create an admin unless one with this username already exists.
pub async fn create_admin(
    admins: &dyn AdminStore,
    username: &str,
    password: &str,
) -> anyhow::Result<CreateOutcome> {
    validate_credentials(username, password)?;
    let username = username.trim();

    if admins.find_by_username(username).await?.is_some() {
        return Ok(CreateOutcome::AlreadyExists);
    }

    let hash = hash_password(password).context("Failed to hash password")?;
    // A concurrent run may have won the insert between the lookup and here.
    match admins.create(username, &hash).await? {
        Some(admin) => Ok(CreateOutcome::Created(admin)),
        None => Ok(CreateOutcome::AlreadyExists),
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
