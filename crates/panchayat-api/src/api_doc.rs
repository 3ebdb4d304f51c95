//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use crate::services;
use panchayat_core::models;

/// Registers the bearer token scheme referenced by the admin routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Panchayat API",
        version = "0.1.0",
        description = "Content backend for a village council website: events, achievements and public works with image galleries. Reads are public; changes require an admin token."
    ),
    paths(
        handlers::auth::login,
        handlers::auth::verify,
        handlers::content::list_content,
        handlers::content::get_content,
        handlers::content::create_content,
        handlers::content::update_content,
        handlers::content::delete_content,
        handlers::upload::upload_single,
        handlers::upload::upload_multiple,
    ),
    components(
        schemas(
            models::Content,
            models::ContentType,
            models::MediaItem,
            models::MediaKind,
            models::ContentForm,
            models::AdminProfile,
            handlers::auth::LoginRequest,
            handlers::auth::LoginResponse,
            handlers::auth::VerifyResponse,
            handlers::content::MessageResponse,
            services::StoredFile,
            error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Admin login and token verification"),
        (name = "content", description = "Events, achievements and works"),
        (name = "upload", description = "Standalone image uploads"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_content_paths() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/content"));
        assert!(spec.paths.paths.contains_key("/api/content/{id}"));
        assert!(spec.paths.paths.contains_key("/api/auth/login"));
        let components = spec.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
