//! Log In Use Case
//!
//! Verifies a credential and opens a new session. Existing sessions of the
//! same user stay valid until they expire.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::create_session::CreateSessionUseCase;
use crate::application::credentials::CredentialsInput;
use crate::application::notify::spawn_auth_notification;
use crate::domain::entity::session::Session;
use crate::domain::repository::{AuthEventNotifier, CredentialRepository, SessionRepository};
use crate::domain::value_object::auth_mode::AuthMode;
use crate::error::{AuthError, AuthResult};

/// Log in output
#[derive(Debug)]
pub struct LogInOutput {
    pub session: Session,
}

/// Log in use case
pub struct LogInUseCase<C, S, N>
where
    C: CredentialRepository,
    S: SessionRepository,
    N: AuthEventNotifier,
{
    credential_repo: Arc<C>,
    session_repo: Arc<S>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
}

impl<C, S, N> LogInUseCase<C, S, N>
where
    C: CredentialRepository,
    S: SessionRepository,
    N: AuthEventNotifier + Sync + 'static,
{
    pub fn new(
        credential_repo: Arc<C>,
        session_repo: Arc<S>,
        notifier: Arc<N>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            credential_repo,
            session_repo,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: CredentialsInput) -> AuthResult<LogInOutput> {
        let valid = input.validate()?;
        let user_name = valid.user_name;

        // Unknown user and wrong password must look the same to the client
        let credential = self
            .credential_repo
            .find(&user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = valid.password;
        let password_valid = tokio::task::spawn_blocking(move || {
            credential.password_hash.verify(&raw_password)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))?;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let session = CreateSessionUseCase::new(self.session_repo.clone(), self.config.clone())
            .execute(user_name.clone())
            .await?;

        tracing::info!(user_name = %user_name, "User logged in");

        spawn_auth_notification(self.notifier.clone(), AuthMode::Login, user_name);

        Ok(LogInOutput { session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sign_up::SignUpUseCase;
    use crate::infra::{KvCredentialRepository, KvSessionRepository, MemoryStore, NoopNotifier};

    type Credentials = KvCredentialRepository<MemoryStore>;
    type Sessions = KvSessionRepository<MemoryStore>;

    fn input(name: &str, password: &str) -> CredentialsInput {
        CredentialsInput {
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    fn use_cases() -> (
        SignUpUseCase<Credentials, Sessions, NoopNotifier>,
        LogInUseCase<Credentials, Sessions, NoopNotifier>,
    ) {
        let credentials = Arc::new(KvCredentialRepository::new(MemoryStore::new()));
        let sessions = Arc::new(KvSessionRepository::new(MemoryStore::new()));
        let notifier = Arc::new(NoopNotifier);
        let config = Arc::new(AuthConfig::default());
        (
            SignUpUseCase::new(
                credentials.clone(),
                sessions.clone(),
                notifier.clone(),
                config.clone(),
            ),
            LogInUseCase::new(credentials, sessions, notifier, config),
        )
    }

    #[tokio::test]
    async fn test_log_in_issues_new_token() {
        let (sign_up, log_in) = use_cases();
        let first = sign_up.execute(input("alice123", "secret1")).await.unwrap();

        let second = log_in.execute(input("ALICE123", "secret1")).await.unwrap();
        assert_eq!(second.session.user_name.as_str(), "alice123");
        assert_ne!(first.session.token, second.session.token);
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_the_same() {
        let (sign_up, log_in) = use_cases();
        sign_up.execute(input("alice123", "secret1")).await.unwrap();

        let unknown = log_in
            .execute(input("ghost", "whatever"))
            .await
            .unwrap_err();
        let wrong = log_in
            .execute(input("alice123", "wrong-password"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.public_message(), "Invalid credentials");
        assert_eq!(unknown.public_message(), wrong.public_message());
    }

    #[tokio::test]
    async fn test_log_in_validates_input_first() {
        let (_, log_in) = use_cases();
        let err = log_in.execute(input("ghost", "short")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }
}
