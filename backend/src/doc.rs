//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the wire
//! schema wrappers from [`crate::inbound::http::schemas`], and the session
//! cookie security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::auth::SignInRequest;
use crate::inbound::http::error::{ErrorBody, MessageBody};
use crate::inbound::http::health::{ProbeBody, StorageKind};
use crate::inbound::http::posts::{CreatePostRequest, DeletePostRequest, UpdatePostRequest};
use crate::inbound::http::schemas::{PostListingSchema, PostSchema, UserSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

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
                "Session cookie issued by POST /api/auth/session.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog backend API",
        description = "Session-authenticated posts API with health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PostSchema,
        PostListingSchema,
        UserSchema,
        ErrorBody,
        MessageBody,
        CreatePostRequest,
        UpdatePostRequest,
        DeletePostRequest,
        SignInRequest,
        ProbeBody,
        StorageKind,
    )),
    tags(
        (name = "posts", description = "Reading and writing blog posts"),
        (name = "auth", description = "Signing in and out"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
