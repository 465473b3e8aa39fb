//! Check Session Use Case
//!
//! Validates a session token against the user name a URL claims and slides
//! the session TTL on success.

use std::sync::Arc;

use platform::crypto::constant_time_eq;

use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{session_token::SessionToken, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// A session that passed validation and has been refreshed
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    pub token: SessionToken,
    pub user_name: UserName,
}

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Validate `cookie_token` for `claimed_user_name`.
    ///
    /// The comparison is case-sensitive: the stored name is canonical
    /// lowercase, so a URL with upper-case letters never matches.
    pub async fn execute(
        &self,
        cookie_token: Option<&str>,
        claimed_user_name: &str,
    ) -> AuthResult<ValidatedSession> {
        let token = cookie_token
            .and_then(SessionToken::from_cookie)
            .ok_or(AuthError::SessionMissingOrExpired)?;

        let user_name = self
            .session_repo
            .find_user_name(&token)
            .await?
            .ok_or(AuthError::SessionMissingOrExpired)?;

        if !constant_time_eq(user_name.as_str().as_bytes(), claimed_user_name.as_bytes()) {
            tracing::warn!(
                token = token.log_prefix(),
                session_user = %user_name,
                claimed_user = claimed_user_name,
                "Session user does not match URL"
            );
            return Err(AuthError::UsernameMismatch);
        }

        // The key can expire between the read and the refresh
        if !self
            .session_repo
            .refresh(&token, self.config.session_ttl)
            .await?
        {
            return Err(AuthError::SessionMissingOrExpired);
        }

        tracing::debug!(token = token.log_prefix(), user_name = %user_name, "Session refreshed");

        Ok(ValidatedSession { token, user_name })
    }
}
