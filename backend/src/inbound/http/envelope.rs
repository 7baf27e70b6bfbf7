//! Rendering of [`ResultEnvelope`]s as HTTP responses.
//!
//! Success payloads become JSON bodies: a user view as an object, a list as
//! an array and a message as `{"message": ...}`. Failures reuse the domain
//! [`Error`](crate::domain::Error) body so clients see a single error shape
//! across the API.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{AccessError, Outcome, Payload, ResultEnvelope};

/// Status mapping for the `BadInput` outcome.
///
/// `Legacy` answers malformed ids and blank fields with 500, matching what
/// existing clients observe. `Strict` answers them with 400.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    #[default]
    Legacy,
    Strict,
}

impl StatusPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Legacy }
    }

    /// HTTP status for an outcome under this policy.
    ///
    /// # Examples
    /// ```
    /// use actix_web::http::StatusCode;
    /// use accounts::domain::Outcome;
    /// use accounts::inbound::http::envelope::StatusPolicy;
    ///
    /// assert_eq!(StatusPolicy::Legacy.status_for(Outcome::BadInput), StatusCode::INTERNAL_SERVER_ERROR);
    /// assert_eq!(StatusPolicy::Strict.status_for(Outcome::BadInput), StatusCode::BAD_REQUEST);
    /// ```
    pub fn status_for(self, outcome: Outcome) -> StatusCode {
        match outcome {
            Outcome::Ok => StatusCode::OK,
            Outcome::NotFound => StatusCode::NOT_FOUND,
            Outcome::Forbidden => StatusCode::FORBIDDEN,
            Outcome::Conflict => StatusCode::CONFLICT,
            Outcome::BadInput => match self {
                Self::Legacy => StatusCode::INTERNAL_SERVER_ERROR,
                Self::Strict => StatusCode::BAD_REQUEST,
            },
            Outcome::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body used for message payloads on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageBody {
    #[schema(example = "User has been added with id 507f1f77bcf86cd799439011")]
    pub message: String,
}

/// Render an envelope.
pub fn respond(envelope: ResultEnvelope, policy: StatusPolicy) -> HttpResponse {
    let mut builder = HttpResponse::build(policy.status_for(envelope.outcome()));
    if let Some(error) = envelope.to_error() {
        return builder.json(error);
    }
    match envelope.into_payload() {
        Payload::User(view) => builder.json(view),
        Payload::Users(views) => builder.json(views),
        Payload::Message(message) => builder.json(MessageBody { message }),
    }
}

/// Render an operation result, turning unexpected failures into the
/// internal-error envelope.
pub fn respond_to(result: Result<ResultEnvelope, AccessError>, policy: StatusPolicy) -> HttpResponse {
    let envelope = result.unwrap_or_else(|err| {
        error!(
            operation = err.operation(),
            error = %err,
            "unexpected failure reached the HTTP boundary"
        );
        ResultEnvelope::internal_error()
    });
    respond(envelope, policy)
}
