//! Library catalogue service with per-user borrow and favourite ledgers.
//!
//! The domain keeps each signed-in user's borrowed and favourite book ids in
//! a key-value store, seeding them from the catalogue on first access. The
//! HTTP adapter exposes browsing, borrowing and favouriting over actix-web.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
