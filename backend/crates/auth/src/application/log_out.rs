//! Log Out Use Case
//!
//! Deletes the session behind a cookie. Never fails: the cookie is cleared
//! by the handler regardless.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::session_token::SessionToken;

pub struct LogOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> LogOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, cookie_token: Option<&str>) {
        let Some(token) = cookie_token.and_then(SessionToken::from_cookie) else {
            return;
        };

        match self.session_repo.delete(&token).await {
            Ok(()) => tracing::info!(token = token.log_prefix(), "Session deleted"),
            Err(e) => tracing::warn!(
                token = token.log_prefix(),
                error = %e,
                "Failed to delete session on logout"
            ),
        }
    }
}
