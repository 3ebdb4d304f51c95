//! Argon2 password hashing for admin accounts.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use panchayat_core::AppError;
use rand_core::OsRng;
use std::sync::OnceLock;

/// Hash a password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Hash that no real password matches, computed once with the same
/// parameters as stored hashes.
fn dummy_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| {
        hash_password("panchayat-no-such-admin").unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to prepare dummy password hash");
            String::new()
        })
    })
}

/// Check a login attempt. An unknown account is verified against a dummy
/// hash so it costs the same as a wrong password.
pub fn verify_credentials(password: &str, stored_hash: Option<&str>) -> bool {
    match stored_hash {
        Some(hash) => verify_password(password, hash),
        None => {
            verify_password(password, dummy_hash());
            false
        }
    }
}
