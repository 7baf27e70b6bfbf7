//! User account management backend.
//!
//! A hexagonal service: [`domain`] holds the account model, ports and the
//! access coordinator; [`inbound`] exposes it over HTTP; [`outbound`]
//! provides PostgreSQL, Redis, in-memory and bcrypt adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
