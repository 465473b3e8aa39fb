//! Proxy Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use auth::domain::KeyValueStore;

use crate::presentation::handlers::{self, ProxyAppState};
use crate::presentation::middleware::{GuardState, route_guard};

/// Backend passthrough, CSV upload, health check and the page fallback
pub fn proxy_router(state: ProxyAppState) -> Router {
    let upload_limit = state.config.upload_max_bytes;

    Router::new()
        .route(
            "/api/router",
            get(handlers::proxy_api).post(handlers::proxy_api),
        )
        .route(
            "/api/router/{*path}",
            get(handlers::proxy_api).post(handlers::proxy_api),
        )
        .route(
            "/file",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::forward_page)
        .with_state(state)
}

/// Put the route guard in front of every route of `router`, fallback included
pub fn with_route_guard<K>(router: Router, state: GuardState<K>) -> Router
where
    K: KeyValueStore + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(state, route_guard::<K>))
}
