//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and live in the inbound
//! adapter where framework concerns belong.

use utoipa::ToSchema;

/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed input. Also used for unreadable request bodies.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Login missing or credentials rejected.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The caller does not own the requested account.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// No account exists for the id or the session's username.
    #[schema(rename = "not_found")]
    NotFound,
    /// Another account already holds the username.
    #[schema(rename = "conflict")]
    Conflict,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// API error response payload.
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Failed to find the user with ID : 507f1f77bcf86cd799439099")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// Public projection of an account. Never carries the password hash.
#[derive(ToSchema)]
#[schema(as = UserView)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserViewSchema {
    #[schema(example = "507f1f77bcf86cd799439011")]
    id: String,
    #[schema(example = "alice")]
    username: String,
}
