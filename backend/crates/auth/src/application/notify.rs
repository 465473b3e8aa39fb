//! Auth Event Notification
//!
//! Fire-and-forget delivery of signup/login events to the backend.

use std::sync::Arc;

use crate::domain::repository::AuthEventNotifier;
use crate::domain::value_object::{auth_mode::AuthMode, user_name::UserName};

/// Deliver `mode` for `user_name` on a detached task.
///
/// The response path never waits on this; failures end up in the log only.
pub fn spawn_auth_notification<N>(notifier: Arc<N>, mode: AuthMode, user_name: UserName)
where
    N: AuthEventNotifier + Sync + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = notifier.notify(mode, &user_name).await {
            tracing::warn!(%mode, user_name = %user_name, error = %e, "Auth notification failed");
        }
    });
}
