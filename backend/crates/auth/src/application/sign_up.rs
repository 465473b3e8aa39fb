//! Sign Up Use Case
//!
//! Creates a credential and opens the first session for it.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::create_session::CreateSessionUseCase;
use crate::application::credentials::CredentialsInput;
use crate::application::notify::spawn_auth_notification;
use crate::domain::entity::{credential::Credential, session::Session};
use crate::domain::repository::{AuthEventNotifier, CredentialRepository, SessionRepository};
use crate::domain::value_object::{auth_mode::AuthMode, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub session: Session,
}

/// Sign up use case
pub struct SignUpUseCase<C, S, N>
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

impl<C, S, N> SignUpUseCase<C, S, N>
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

    pub async fn execute(&self, input: CredentialsInput) -> AuthResult<SignUpOutput> {
        let valid = input.validate()?;
        let user_name = valid.user_name;

        if self.credential_repo.exists(&user_name).await? {
            return Err(AuthError::DuplicateUser);
        }

        // Argon2id is CPU and memory heavy; keep it off the async workers
        let raw_password = valid.password;
        let password_hash =
            tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw_password))
                .await
                .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))?
                .map_err(|e| AuthError::Internal(e.to_string()))?;

        let credential = Credential::new(user_name.clone(), password_hash);

        // Exclusive write closes the gap between the existence check and here
        if !self.credential_repo.create(&credential).await? {
            return Err(AuthError::DuplicateUser);
        }

        let session = CreateSessionUseCase::new(self.session_repo.clone(), self.config.clone())
            .execute(user_name.clone())
            .await?;

        tracing::info!(user_name = %user_name, "User signed up");

        spawn_auth_notification(self.notifier.clone(), AuthMode::Signup, user_name);

        Ok(SignUpOutput { session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::KeyValueStore;
    use crate::infra::{KvCredentialRepository, KvSessionRepository, MemoryStore, NoopNotifier};

    struct Fixture {
        credentials: MemoryStore,
        sessions: MemoryStore,
        use_case: SignUpUseCase<
            KvCredentialRepository<MemoryStore>,
            KvSessionRepository<MemoryStore>,
            NoopNotifier,
        >,
    }

    fn fixture() -> Fixture {
        let credentials = MemoryStore::new();
        let sessions = MemoryStore::new();
        let use_case = SignUpUseCase::new(
            Arc::new(KvCredentialRepository::new(credentials.clone())),
            Arc::new(KvSessionRepository::new(sessions.clone())),
            Arc::new(NoopNotifier),
            Arc::new(AuthConfig::default()),
        );
        Fixture {
            credentials,
            sessions,
            use_case,
        }
    }

    fn input(name: &str, password: &str) -> CredentialsInput {
        CredentialsInput {
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_stores_hash_and_session() {
        let fx = fixture();
        let output = fx.use_case.execute(input("Alice123", "secret1")).await.unwrap();

        assert_eq!(output.session.user_name.as_str(), "alice123");

        let stored = fx.credentials.get("alice123").await.unwrap().unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(!stored.contains("secret1"));

        assert_eq!(
            fx.sessions
                .get(output.session.token.as_str())
                .await
                .unwrap()
                .as_deref(),
            Some("alice123")
        );
        assert_eq!(
            fx.sessions.ttl(output.session.token.as_str()),
            Some(AuthConfig::default().session_ttl)
        );
    }

    #[tokio::test]
    async fn test_duplicate_after_normalization() {
        let fx = fixture();
        fx.use_case.execute(input("bob", "secret1")).await.unwrap();

        let err = fx
            .use_case
            .execute(input("BOB", "another1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser));
        assert_eq!(err.public_message(), "User already exists");
    }

    #[tokio::test]
    async fn test_invalid_input_touches_nothing() {
        let fx = fixture();
        let err = fx.use_case.execute(input("al", "secret1")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
        assert!(fx.credentials.is_empty());
        assert!(fx.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_store_down_is_store_unavailable() {
        let fx = fixture();
        fx.credentials.set_offline(true);
        let err = fx
            .use_case
            .execute(input("alice123", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
        assert_eq!(err.public_message(), "Internal server error");
        assert!(fx.sessions.is_empty());
    }
}
