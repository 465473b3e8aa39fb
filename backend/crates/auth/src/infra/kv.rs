//! Key-Value Repository Implementations
//!
//! Typed credential and session repositories over any [`KeyValueStore`].
//!
//! Layout:
//! - credentials: `<user_name>` → Argon2id PHC string, no expiry
//! - sessions: `<token>` → `<user_name>`, sliding TTL

use std::time::Duration;

use crate::domain::entity::{credential::Credential, session::Session};
use crate::domain::repository::{CredentialRepository, KeyValueStore, SessionRepository};
use crate::domain::value_object::{
    session_token::SessionToken, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Credentials
// ============================================================================

#[derive(Debug, Clone)]
pub struct KvCredentialRepository<S> {
    store: S,
}

impl<S> KvCredentialRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> CredentialRepository for KvCredentialRepository<S>
where
    S: KeyValueStore + Sync,
{
    async fn exists(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self.store.exists(user_name.as_str()).await?)
    }

    async fn find(&self, user_name: &UserName) -> AuthResult<Option<Credential>> {
        let Some(phc) = self.store.get(user_name.as_str()).await? else {
            return Ok(None);
        };

        let password_hash = UserPassword::from_phc_string(phc).map_err(|e| {
            AuthError::Internal(format!("corrupt credential for {user_name}: {e}"))
        })?;

        Ok(Some(Credential::new(user_name.clone(), password_hash)))
    }

    async fn create(&self, credential: &Credential) -> AuthResult<bool> {
        Ok(self
            .store
            .set_if_absent(
                credential.user_name.as_str(),
                credential.password_hash.as_phc_string(),
            )
            .await?)
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[derive(Debug, Clone)]
pub struct KvSessionRepository<S> {
    store: S,
}

impl<S> KvSessionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> SessionRepository for KvSessionRepository<S>
where
    S: KeyValueStore + Sync,
{
    async fn create(&self, session: &Session) -> AuthResult<()> {
        self.store
            .set(
                session.token.as_str(),
                session.user_name.as_str(),
                Some(session.ttl),
            )
            .await?;
        Ok(())
    }

    async fn find_user_name(&self, token: &SessionToken) -> AuthResult<Option<UserName>> {
        let value = self.store.get(token.as_str()).await?;
        Ok(value.map(UserName::from_canonical))
    }

    async fn refresh(&self, token: &SessionToken, ttl: Duration) -> AuthResult<bool> {
        Ok(self.store.expire(token.as_str(), ttl).await?)
    }

    async fn delete(&self, token: &SessionToken) -> AuthResult<()> {
        self.store.delete(token.as_str()).await?;
        Ok(())
    }
}
