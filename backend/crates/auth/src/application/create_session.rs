//! Create Session Use Case
//!
//! Issues a fresh token for an authenticated user and stores it with the
//! configured TTL.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

pub struct CreateSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CreateSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, user_name: UserName) -> AuthResult<Session> {
        let session = Session::issue(user_name, self.config.session_ttl);
        self.session_repo.create(&session).await?;

        tracing::debug!(
            user_name = %session.user_name,
            token = session.token.log_prefix(),
            ttl_secs = session.ttl.as_secs(),
            "Session created"
        );

        Ok(session)
    }
}
