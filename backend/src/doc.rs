//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every account, auth and health endpoint, the schema
//! wrappers from [`crate::inbound::http::schemas`] and the session cookie
//! security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::envelope::MessageBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserViewSchema};
use crate::inbound::http::users::{AddUserBody, UpdateUserBody};

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
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Accounts API",
        description = "Session-authenticated user account management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::add_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserViewSchema,
        ErrorSchema,
        ErrorCodeSchema,
        MessageBody,
        LoginRequest,
        AddUserBody,
        UpdateUserBody
    )),
    tags(
        (name = "users", description = "Account management"),
        (name = "auth", description = "Session login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
