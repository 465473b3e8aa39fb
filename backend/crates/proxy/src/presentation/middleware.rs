//! Route Guard Middleware
//!
//! Runs in front of every gateway route. Requests it cannot validate are
//! never forwarded.

use axum::extract::{Request, State};
use axum::http::{Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use auth::AuthConfig;
use auth::AuthError;
use auth::domain::KeyValueStore;
use auth::infra::KvSessionRepository;
use kernel::error::app_error::AppError;
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::{API_PREFIX, LOGIN_PATH, ProxyConfig};
use crate::application::guard::{GuardOutcome, RouteGuardUseCase};

/// Middleware state
pub struct GuardState<K> {
    pub sessions: Arc<KvSessionRepository<K>>,
    pub auth_config: Arc<AuthConfig>,
    pub config: Arc<ProxyConfig>,
}

impl<K> GuardState<K> {
    pub fn new(sessions: K, auth_config: Arc<AuthConfig>, config: Arc<ProxyConfig>) -> Self {
        Self {
            sessions: Arc::new(KvSessionRepository::new(sessions)),
            auth_config,
            config,
        }
    }
}

impl<K> Clone for GuardState<K> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            auth_config: self.auth_config.clone(),
            config: self.config.clone(),
        }
    }
}

/// Classify the request, validate the session where required, and slide
/// the cookie on success
pub async fn route_guard<K>(
    State(state): State<GuardState<K>>,
    req: Request,
    next: Next,
) -> Response
where
    K: KeyValueStore + Sync + 'static,
{
    let token = extract_cookie(req.headers(), &state.auth_config.session_cookie_name);

    let use_case = RouteGuardUseCase::new(
        state.sessions.clone(),
        state.auth_config.clone(),
        state.config.clone(),
    );

    let outcome = use_case.execute(req.uri().path(), token.as_deref()).await;

    match outcome {
        GuardOutcome::PassThrough => next.run(req).await,
        GuardOutcome::RedirectToLogin => {
            tracing::debug!(
                path = req.uri().path(),
                "Protected exact path, redirecting to login"
            );
            Redirect::to(LOGIN_PATH).into_response()
        }
        GuardOutcome::Authorized(session) => {
            tracing::debug!(
                path = req.uri().path(),
                user_name = %session.user_name,
                token = session.token.log_prefix(),
                "Session accepted"
            );
            let mut response = next.run(req).await;
            match set_cookie_header(&state.auth_config.session_cookie(), session.token.as_str()) {
                Ok(cookie) => {
                    response.headers_mut().append(header::SET_COOKIE, cookie);
                }
                Err(e) => tracing::error!(error = %e, "Failed to build session cookie"),
            }
            response
        }
        GuardOutcome::Denied(err) => deny(&state.auth_config, req.uri(), err),
    }
}

/// API paths get a JSON 401; pages are sent to the login page
fn deny(auth_config: &AuthConfig, uri: &Uri, err: AuthError) -> Response {
    err.log();

    let path = uri.path();
    let clear_cookie = err.clears_session();

    let mut response = if path.starts_with(API_PREFIX) {
        AppError::unauthorized("Unauthorized").into_response()
    } else if clear_cookie {
        Redirect::to(LOGIN_PATH).into_response()
    } else {
        let original = uri.path_and_query().map_or(path, |pq| pq.as_str());
        let target = format!(
            "{LOGIN_PATH}?callbackUrl={}",
            urlencoding::encode(original)
        );
        Redirect::to(&target).into_response()
    };

    if clear_cookie {
        match delete_cookie_header(&auth_config.session_cookie()) {
            Ok(cookie) => {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
            Err(e) => tracing::error!(error = %e, "Failed to build cookie deletion"),
        }
    }

    response
}
