//! Proxy (Access Control & Forwarding) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Route rule table, upload validation
//! - `application/` - Guard use case, configuration
//! - `infra/` - Upstream forwarder, CSV import client
//! - `presentation/` - Guard middleware, handlers, router
//!
//! ## Request flow
//! 1. The route guard classifies the path against the rule table
//! 2. Protected prefixes require a session owned by the user in the URL
//! 3. Accepted requests are forwarded and the session cookie is re-issued
//! 4. Upstream responses stream back with hop-by-hop headers removed

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ProxyConfig;
pub use domain::route_rule::{RouteKind, RouteRule, RouteTable};
pub use error::{ProxyError, ProxyResult};
pub use presentation::{GuardState, ProxyAppState, proxy_router, with_route_guard};
