//! Route Guard Use Case
//!
//! Classifies a request path and, for protected prefixes, checks that the
//! session cookie belongs to the user named in the URL.

use std::sync::Arc;

use auth::AuthConfig;
use auth::AuthError;
use auth::application::{CheckSessionUseCase, ValidatedSession};
use auth::domain::SessionRepository;

use crate::application::config::ProxyConfig;
use crate::domain::route_rule::RouteMatch;

#[derive(Debug)]
pub enum GuardOutcome {
    /// Not intercepted: static asset, public path, or malformed user segment
    PassThrough,
    /// Protected path without a user segment
    RedirectToLogin,
    /// Session validated and its TTL reset
    Authorized(ValidatedSession),
    /// Validation failed; the request must not be forwarded
    Denied(AuthError),
}

pub struct RouteGuardUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    auth_config: Arc<AuthConfig>,
    config: Arc<ProxyConfig>,
}

impl<S> RouteGuardUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(
        session_repo: Arc<S>,
        auth_config: Arc<AuthConfig>,
        config: Arc<ProxyConfig>,
    ) -> Self {
        Self {
            session_repo,
            auth_config,
            config,
        }
    }

    pub async fn execute(&self, path: &str, cookie_token: Option<&str>) -> GuardOutcome {
        let user_name = match self.config.routes.classify(path) {
            RouteMatch::StaticAsset | RouteMatch::Public => return GuardOutcome::PassThrough,
            RouteMatch::MalformedUser { segment } => {
                tracing::debug!(path, segment, "Malformed user segment, passing through");
                return GuardOutcome::PassThrough;
            }
            RouteMatch::ProtectedExact => return GuardOutcome::RedirectToLogin,
            RouteMatch::Protected { user_name } => user_name,
        };

        let use_case =
            CheckSessionUseCase::new(self.session_repo.clone(), self.auth_config.clone());
        match use_case.execute(cookie_token, user_name).await {
            Ok(session) => GuardOutcome::Authorized(session),
            Err(e) => GuardOutcome::Denied(e),
        }
    }
}
