//! HS256 session tokens for admins.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use panchayat_core::{AdminProfile, AppError};

use super::models::AdminClaims;

/// Issues and verifies admin session tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl JwtService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    pub fn issue(&self, admin: &AdminProfile) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AdminClaims {
            sub: admin.id,
            username: admin.username.clone(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode token: {}", e)))
    }

    /// Decode and validate a token (signature and expiry).
    pub fn verify(&self, token: &str) -> Result<AdminClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        jsonwebtoken::decode::<AdminClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AppError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

    fn profile() -> AdminProfile {
        AdminProfile {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let service = JwtService::new(SECRET, 24);
        let admin = profile();
        let token = service.issue(&admin).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, admin.id);
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtService::new(SECRET, 24).issue(&profile()).unwrap();
        let other = JwtService::new("another-secret-that-is-long-enough-xx", 24);
        assert!(matches!(other.verify(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new(SECRET, -1);
        let token = service.issue(&profile()).unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let service = JwtService::new(SECRET, 24);
        assert!(service.verify("not.a.token").is_err());
    }
}
