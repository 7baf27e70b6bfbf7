//! Test helpers for inbound HTTP components.

use std::sync::Mutex;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use async_trait::async_trait;

use crate::domain::ports::{NewUserRequest, SessionInvalidator, UpdateUserRequest, UserAccounts};
use crate::domain::{AccessError, CallerIdentity, ResultEnvelope};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// A call observed by [`ScriptedAccounts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCall {
    ListAll,
    GetById { id: String, caller: String },
    AddUser(NewUserRequest),
    UpdateById { request: UpdateUserRequest, caller: String },
    DeleteById { id: String, caller: String },
}

/// `UserAccounts` double answering every call with the same result.
///
/// Successful updates and deletes invalidate the session, as the real
/// service does.
pub struct ScriptedAccounts {
    answer: Result<ResultEnvelope, AccessError>,
    calls: Mutex<Vec<AccountCall>>,
}

impl ScriptedAccounts {
    pub fn answering(answer: Result<ResultEnvelope, AccessError>) -> Self {
        Self {
            answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<AccountCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: AccountCall) -> Result<ResultEnvelope, AccessError> {
        self.calls.lock().expect("calls lock").push(call);
        self.answer.clone()
    }

    fn record_mutation(
        &self,
        call: AccountCall,
        session: &dyn SessionInvalidator,
    ) -> Result<ResultEnvelope, AccessError> {
        let answer = self.record(call);
        if answer.as_ref().is_ok_and(ResultEnvelope::is_ok) {
            session.invalidate();
        }
        answer
    }
}

#[async_trait(?Send)]
impl UserAccounts for ScriptedAccounts {
    async fn list_all(&self) -> Result<ResultEnvelope, AccessError> {
        self.record(AccountCall::ListAll)
    }

    async fn get_by_id(
        &self,
        id: &str,
        caller: &CallerIdentity,
    ) -> Result<ResultEnvelope, AccessError> {
        self.record(AccountCall::GetById {
            id: id.to_owned(),
            caller: caller.username().to_string(),
        })
    }

    async fn add_user(&self, request: NewUserRequest) -> Result<ResultEnvelope, AccessError> {
        self.record(AccountCall::AddUser(request))
    }

    async fn update_by_id(
        &self,
        request: UpdateUserRequest,
        caller: &CallerIdentity,
        session: &dyn SessionInvalidator,
    ) -> Result<ResultEnvelope, AccessError> {
        self.record_mutation(
            AccountCall::UpdateById {
                request,
                caller: caller.username().to_string(),
            },
            session,
        )
    }

    async fn delete_by_id(
        &self,
        id: &str,
        caller: &CallerIdentity,
        session: &dyn SessionInvalidator,
    ) -> Result<ResultEnvelope, AccessError> {
        self.record_mutation(
            AccountCall::DeleteById {
                id: id.to_owned(),
                caller: caller.username().to_string(),
            },
            session,
        )
    }
}
