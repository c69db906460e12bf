//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every `#[utoipa::path]` handler in the inbound layer and
//! declares the bearer security scheme. The document is served by Swagger UI
//! in debug mode and exported via `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::envelope::SuccessEnvelope;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::health::{CheckResponse, HealthChecks, HealthResponse};
use crate::inbound::http::users::{
    CreateUserRequest, PaginationResponse, UpdateUserRequest, UserListResponse, UserResponse,
};

/// Name of the security scheme referenced by the users handlers.
pub const BEARER_SCHEME: &str = "bearer";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HMAC-signed JWT with an `exp` claim."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Users API",
        description = "CRUD interface over user records, plus a health probe."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        CreateUserRequest,
        UpdateUserRequest,
        UserResponse,
        UserListResponse,
        PaginationResponse,
        SuccessEnvelope<UserResponse>,
        SuccessEnvelope<UserListResponse>,
        ErrorEnvelope,
        HealthResponse,
        HealthChecks,
        CheckResponse,
    )),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Process and dependency health")
    )
)]
pub struct ApiDoc;
