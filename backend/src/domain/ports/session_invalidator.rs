//! Port used to force the caller to authenticate again.

/// Ends the caller's authenticated session.
///
/// Account updates and deletions call this once their writes succeed.
#[cfg_attr(test, mockall::automock)]
pub trait SessionInvalidator {
    fn invalidate(&self);
}

/// Invalidator for contexts without a session, such as background jobs and
/// tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionInvalidator;

impl SessionInvalidator for NoopSessionInvalidator {
    fn invalidate(&self) {}
}
