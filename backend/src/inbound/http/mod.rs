//! HTTP inbound adapter exposing the account REST endpoints.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
