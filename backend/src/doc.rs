//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the REST API:
//! catalogue endpoints, authentication, uploads, the application intake,
//! and the liveness probe. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::application::CourseRef;
use crate::domain::{ApplicationForm, Course, CourseForm, Error, ErrorCode};
use crate::inbound::http::applications::ApplicationAccepted;
use crate::inbound::http::auth::{IdentityResponse, LoginRequest};
use crate::inbound::http::uploads::AvatarUploaded;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Course catalogue API",
        description = "Catalogue browsing, session authentication, avatar uploads, and course applications.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::me,
        crate::inbound::http::auth::logout,
        crate::inbound::http::applications::submit_application,
        crate::inbound::http::uploads::upload_avatar,
        crate::inbound::http::uploads::serve_upload,
        crate::inbound::http::health::healthz,
    ),
    components(schemas(
        Course,
        CourseForm,
        Error,
        ErrorCode,
        LoginRequest,
        IdentityResponse,
        ApplicationForm,
        CourseRef,
        ApplicationAccepted,
        AvatarUploaded,
    )),
    tags(
        (name = "courses", description = "Catalogue reads and admin mutations"),
        (name = "auth", description = "Session issue, inspection, and teardown"),
        (name = "applications", description = "Append-only course applications"),
        (name = "uploads", description = "Avatar assets"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
