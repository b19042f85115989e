//! Multi-tenant hostel management backend.
//!
//! - [`domain`]: entities, services and the ports they depend on.
//! - [`inbound`]: the HTTP adapter and its role gate.
//! - [`outbound`]: PostgreSQL, in-memory and bcrypt adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
