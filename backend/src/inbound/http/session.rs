//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The session cookie stores the authenticated username. Handlers turn it
//! into a [`CallerIdentity`] and pass the wrapper itself to the account
//! service as its [`SessionInvalidator`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::ports::SessionInvalidator;
use crate::domain::{CallerIdentity, Error, Username};

pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated username in the session cookie.
    pub fn persist_username(&self, username: &Username) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, username.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the session's username, if present and well formed.
    pub fn username(&self) -> Result<Option<Username>, Error> {
        let stored = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(stored.and_then(|raw| match Username::new(raw) {
            Ok(username) => Some(username),
            Err(error) => {
                warn!(%error, "invalid username in session cookie");
                None
            }
        }))
    }

    /// Require an authenticated caller or return `401 Unauthorized`.
    pub fn require_caller(&self) -> Result<CallerIdentity, Error> {
        self.username()?
            .map(CallerIdentity::new)
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop all session state so the cookie is cleared on the response.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl SessionInvalidator for SessionContext {
    fn invalidate(&self) {
        debug!("session invalidated after account change");
        self.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
