//! Presentation Layer
//!
//! Guard middleware, handlers and router.

pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::ProxyAppState;
pub use middleware::{GuardState, route_guard};
pub use router::{proxy_router, with_route_guard};
