//! Router Assembly
//!
//! `/auth` routes, the proxy routes, and the route guard in front of all
//! of them.

use std::sync::Arc;

use auth::domain::{AuthEventNotifier, KeyValueStore};
use auth::{AuthAppState, auth_router};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use proxy::{GuardState, ProxyAppState, proxy_router, with_route_guard};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::settings::Settings;

/// Store handles and clients the router is built from
pub struct AppParts<K, N> {
    pub credentials: K,
    pub sessions: K,
    pub notifier: N,
    pub http_client: reqwest::Client,
}

pub fn build_app<K, N>(settings: &Settings, parts: AppParts<K, N>) -> Router
where
    K: KeyValueStore + Clone + Sync + 'static,
    N: AuthEventNotifier + Sync + 'static,
{
    let auth_config = Arc::new(settings.auth.clone());
    let proxy_config = Arc::new(settings.proxy.clone());

    let auth_state = AuthAppState::new(
        parts.credentials,
        parts.sessions.clone(),
        parts.notifier,
        auth_config.clone(),
    );
    let proxy_state = ProxyAppState::new(proxy_config.clone(), parts.http_client);
    let guard_state = GuardState::new(parts.sessions, auth_config, proxy_config);

    let routes = Router::new()
        .nest("/auth", auth_router(auth_state))
        .merge(proxy_router(proxy_state));

    let app = with_route_guard(routes, guard_state).layer(TraceLayer::new_for_http());

    match cors_layer(&settings.cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods(AllowMethods::list([
                Method::GET,
                Method::POST,
                Method::OPTIONS,
            ]))
            .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
            .allow_credentials(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{StoreBackend, StoreSettings};
    use auth::infra::{MemoryStore, NoopNotifier};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    fn settings(cors_origins: Vec<String>) -> Settings {
        Settings {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            store: StoreSettings {
                backend: StoreBackend::Memory,
                redis_url: String::new(),
                credentials_db: 0,
                sessions_db: 1,
                op_timeout: Duration::from_secs(2),
            },
            cors_origins,
            auth: auth::AuthConfig::default(),
            proxy: proxy::ProxyConfig::default().with_backend_origin("http://127.0.0.1:1"),
        }
    }

    fn app(cors_origins: Vec<String>) -> Router {
        build_app(
            &settings(cors_origins),
            AppParts {
                credentials: MemoryStore::new(),
                sessions: MemoryStore::new(),
                notifier: NoopNotifier,
                http_client: reqwest::Client::new(),
            },
        )
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = app(Vec::new())
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_signup_then_guarded_request() {
        let app = app(Vec::new());

        let signup = app
            .clone()
            .oneshot(
                Request::post("/auth/signup")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"alice123","password":"secret1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(signup.status(), StatusCode::OK);
        let cookie = signup
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        // Authorized, but the backend is down
        let response = app
            .oneshot(
                Request::get("/api/router/dashboard/alice123")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let response = app(vec!["http://localhost:3001".to_string()])
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/auth/login")
                    .header(header::ORIGIN, "http://localhost:3001")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:3001"
        );
    }

    #[test]
    fn test_cors_disabled_without_origins() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&["http://localhost:3001".to_string()]).is_some());
    }
}
