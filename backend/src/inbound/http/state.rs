//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, UserAccounts};

use super::envelope::StatusPolicy;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn UserAccounts>,
    pub login: Arc<dyn LoginService>,
    pub status_policy: StatusPolicy,
}

impl HttpState {
    /// Construct state with the default [`StatusPolicy`].
    pub fn new(accounts: Arc<dyn UserAccounts>, login: Arc<dyn LoginService>) -> Self {
        Self {
            accounts,
            login,
            status_policy: StatusPolicy::default(),
        }
    }

    pub fn with_status_policy(mut self, status_policy: StatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }
}
