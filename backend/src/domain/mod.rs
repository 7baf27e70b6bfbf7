//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed user account model and the services
//! that coordinate the primary store and the cache. Nothing in here knows
//! about HTTP, Diesel or Redis; adapters reach the domain only through the
//! traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - UserId, Username, PasswordHash, UserRecord, NewUserRecord, UserView:
//!   the account model.
//! - PlainPassword, LoginCredentials, CallerIdentity: authentication inputs.
//! - ResultEnvelope, Outcome, Payload: the uniform operation result.
//! - UserAccessService: the account access coordinator.
//! - PasswordLoginService: credential verification for login.

pub mod access_error;
pub mod auth;
pub mod authentication;
pub mod envelope;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_access;

pub use self::access_error::AccessError;
pub use self::auth::{CallerIdentity, CredentialsValidationError, LoginCredentials, PlainPassword};
pub use self::authentication::PasswordLoginService;
pub use self::envelope::{INTERNAL_ERROR_MESSAGE, Outcome, Payload, ResultEnvelope};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;
pub use self::user::{
    NewUserRecord, PasswordHash, UserId, UserRecord, UserValidationError, UserView, Username,
};
pub use self::user_access::UserAccessService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use accounts::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
