//! Uniform result shape returned by user account operations.
//!
//! A [`ResultEnvelope`] pairs an [`Outcome`] with a [`Payload`]. Failures
//! always carry a human-readable message; successes carry a view, a list of
//! views or a confirmation message. Mapping outcomes onto a transport status
//! is left to inbound adapters.

use super::{Error, ErrorCode, UserView};

/// Message used for every internal-error envelope.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Categorical result of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ok,
    NotFound,
    Forbidden,
    Conflict,
    BadInput,
    InternalError,
}

impl Outcome {
    /// Error code reported for failure outcomes; `None` for [`Outcome::Ok`].
    pub fn error_code(self) -> Option<ErrorCode> {
        match self {
            Self::Ok => None,
            Self::NotFound => Some(ErrorCode::NotFound),
            Self::Forbidden => Some(ErrorCode::Forbidden),
            Self::Conflict => Some(ErrorCode::Conflict),
            Self::BadInput => Some(ErrorCode::InvalidRequest),
            Self::InternalError => Some(ErrorCode::InternalError),
        }
    }
}

/// Body carried by an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    User(UserView),
    Users(Vec<UserView>),
    Message(String),
}

/// Outcome plus payload.
///
/// # Examples
/// ```
/// use accounts::domain::{Outcome, ResultEnvelope};
///
/// let envelope = ResultEnvelope::not_found("cannot find the user");
/// assert_eq!(envelope.outcome(), Outcome::NotFound);
/// assert_eq!(envelope.message(), Some("cannot find the user"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEnvelope {
    outcome: Outcome,
    payload: Payload,
}

impl ResultEnvelope {
    fn failure(outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            outcome,
            payload: Payload::Message(message.into()),
        }
    }

    pub fn ok_user(view: UserView) -> Self {
        Self {
            outcome: Outcome::Ok,
            payload: Payload::User(view),
        }
    }

    pub fn ok_users(views: Vec<UserView>) -> Self {
        Self {
            outcome: Outcome::Ok,
            payload: Payload::Users(views),
        }
    }

    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Ok,
            payload: Payload::Message(message.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::failure(Outcome::NotFound, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::failure(Outcome::Forbidden, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::failure(Outcome::Conflict, message)
    }

    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::failure(Outcome::BadInput, message)
    }

    /// Internal failure; the message is fixed so no store detail escapes.
    pub fn internal_error() -> Self {
        Self::failure(Outcome::InternalError, INTERNAL_ERROR_MESSAGE)
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    pub fn is_ok(&self) -> bool {
        self.outcome == Outcome::Ok
    }

    /// Message text when the payload is a message.
    pub fn message(&self) -> Option<&str> {
        match &self.payload {
            Payload::Message(message) => Some(message.as_str()),
            Payload::User(_) | Payload::Users(_) => None,
        }
    }

    /// Convert a failure envelope into the domain [`Error`] shape.
    ///
    /// Returns `None` for successful envelopes.
    pub fn to_error(&self) -> Option<Error> {
        let code = self.outcome.error_code()?;
        let message = self.message().unwrap_or(INTERNAL_ERROR_MESSAGE);
        Some(Error::new(code, message))
    }
}
