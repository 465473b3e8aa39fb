//! Auth Router

use axum::{Router, routing::post};

use crate::domain::repository::{AuthEventNotifier, KeyValueStore};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the `/auth` router (mount with `Router::nest("/auth", ...)`)
pub fn auth_router<K, N>(state: AuthAppState<K, N>) -> Router
where
    K: KeyValueStore + Sync + 'static,
    N: AuthEventNotifier + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<K, N>))
        .route("/login", post(handlers::log_in::<K, N>))
        .route("/logout", post(handlers::log_out::<K, N>))
        .with_state(state)
}
