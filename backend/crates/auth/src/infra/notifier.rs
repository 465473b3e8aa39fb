//! Backend Auth Event Notifier
//!
//! After a successful signup or login the backend content service is told
//! about the user with `POST {backend}/auth/{mode}/{user_name}`. Delivery is
//! best effort; the caller never waits on it.

use std::time::Duration;

use crate::domain::repository::{AuthEventNotifier, NotifyError};
use crate::domain::value_object::{auth_mode::AuthMode, user_name::UserName};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct HttpAuthNotifier {
    client: reqwest::Client,
    backend_origin: String,
}

impl HttpAuthNotifier {
    pub fn new(client: reqwest::Client, backend_origin: impl Into<String>) -> Self {
        let backend_origin: String = backend_origin.into();
        Self {
            client,
            backend_origin: backend_origin.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, mode: AuthMode, user_name: &UserName) -> String {
        format!("{}/auth/{}/{}", self.backend_origin, mode, user_name)
    }
}

impl AuthEventNotifier for HttpAuthNotifier {
    async fn notify(&self, mode: AuthMode, user_name: &UserName) -> Result<(), NotifyError> {
        let url = self.endpoint(mode, user_name);

        let response = self
            .client
            .post(&url)
            .timeout(NOTIFY_TIMEOUT)
            .send()
            .await
            .map_err(|e| NotifyError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError(format!("backend answered {status}")));
        }

        tracing::debug!(%mode, user_name = %user_name, "Backend notified");
        Ok(())
    }
}

/// Notifier that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl AuthEventNotifier for NoopNotifier {
    async fn notify(&self, _mode: AuthMode, _user_name: &UserName) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let notifier = HttpAuthNotifier::new(reqwest::Client::new(), "http://127.0.0.1:8000/");
        let name = UserName::parse("Alice123").unwrap();
        assert_eq!(
            notifier.endpoint(AuthMode::Signup, &name),
            "http://127.0.0.1:8000/auth/signup/alice123"
        );
        assert_eq!(
            notifier.endpoint(AuthMode::Login, &name),
            "http://127.0.0.1:8000/auth/login/alice123"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        let notifier = HttpAuthNotifier::new(reqwest::Client::new(), "http://127.0.0.1:1");
        let name = UserName::parse("alice123").unwrap();
        assert!(notifier.notify(AuthMode::Login, &name).await.is_err());
    }
}
