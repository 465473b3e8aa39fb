//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{LogInUseCase, LogOutUseCase, SignUpUseCase};
use crate::domain::entity::session::Session;
use crate::domain::repository::{AuthEventNotifier, KeyValueStore};
use crate::error::{AuthError, AuthResult};
use crate::infra::{KvCredentialRepository, KvSessionRepository};
use crate::presentation::dto::{AuthRequest, AuthResponse};

/// Shared state for auth handlers
///
/// `K` is the store type behind both namespaces; the two handles are
/// still independent instances.
pub struct AuthAppState<K, N> {
    pub credentials: Arc<KvCredentialRepository<K>>,
    pub sessions: Arc<KvSessionRepository<K>>,
    pub notifier: Arc<N>,
    pub config: Arc<AuthConfig>,
}

impl<K, N> AuthAppState<K, N> {
    pub fn new(credentials: K, sessions: K, notifier: N, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials: Arc::new(KvCredentialRepository::new(credentials)),
            sessions: Arc::new(KvSessionRepository::new(sessions)),
            notifier: Arc::new(notifier),
            config,
        }
    }
}

impl<K, N> Clone for AuthAppState<K, N> {
    fn clone(&self) -> Self {
        Self {
            credentials: self.credentials.clone(),
            sessions: self.sessions.clone(),
            notifier: self.notifier.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Signup
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<K, N>(
    State(state): State<AuthAppState<K, N>>,
    body: Bytes,
) -> AuthResult<impl IntoResponse>
where
    K: KeyValueStore + Sync + 'static,
    N: AuthEventNotifier + Sync + 'static,
{
    let input = parse_body(&body)?.into_input()?;

    let use_case = SignUpUseCase::new(
        state.credentials.clone(),
        state.sessions.clone(),
        state.notifier.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(input).await?;

    session_response(&state.config, output.session)
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn log_in<K, N>(
    State(state): State<AuthAppState<K, N>>,
    body: Bytes,
) -> AuthResult<impl IntoResponse>
where
    K: KeyValueStore + Sync + 'static,
    N: AuthEventNotifier + Sync + 'static,
{
    let input = parse_body(&body)?.into_input()?;

    let use_case = LogInUseCase::new(
        state.credentials.clone(),
        state.sessions.clone(),
        state.notifier.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(input).await?;

    session_response(&state.config, output.session)
}

// ============================================================================
// Logout
// ============================================================================

/// POST /auth/logout
pub async fn log_out<K, N>(
    State(state): State<AuthAppState<K, N>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    K: KeyValueStore + Sync + 'static,
    N: AuthEventNotifier + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name);

    LogOutUseCase::new(state.sessions.clone())
        .execute(token.as_deref())
        .await;

    let cookie = delete_cookie_header(&state.config.session_cookie())
        .map_err(|e| AuthError::Internal(format!("invalid cookie header: {e}")))?;

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Bodies are parsed as JSON whatever their `Content-Type`
fn parse_body(body: &[u8]) -> AuthResult<AuthRequest> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected auth request body");
        AuthError::InvalidInput("Invalid request body".to_string())
    })
}

fn session_response(
    config: &AuthConfig,
    session: Session,
) -> AuthResult<impl IntoResponse + use<>> {
    let cookie: HeaderValue = set_cookie_header(&config.session_cookie(), session.token.as_str())
        .map_err(|e| AuthError::Internal(format!("invalid cookie header: {e}")))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            username: session.user_name.into_inner(),
        }),
    ))
}
