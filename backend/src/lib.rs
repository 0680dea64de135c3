//! Users API library modules.
//!
//! Hexagonal layout: [`domain`] holds entities and ports, [`inbound`] the
//! actix-web adapter, [`outbound`] the persistence adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
