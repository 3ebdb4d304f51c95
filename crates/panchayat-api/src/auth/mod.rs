//! Admin authentication: password hashing, JWT issue/verify and the bearer
//! token middleware guarding mutating routes.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use jwt::JwtService;
pub use middleware::{require_admin, AuthState};
pub use models::{AdminClaims, AdminContext, OptionalAdmin};
