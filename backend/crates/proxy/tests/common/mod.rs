#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use auth::domain::KeyValueStore;
use auth::infra::{MemoryStore, NoopNotifier};
use auth::{AuthAppState, AuthConfig, auth_router};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Multipart, Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use proxy::{GuardState, ProxyAppState, ProxyConfig, proxy_router, with_route_guard};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TTL: Duration = Duration::from_secs(1080);

/// One request as seen by the mock backend
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    /// Multipart field names, for CSV imports
    pub fields: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    pub recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    fn push(&self, recorded: Recorded) {
        self.recorded.lock().unwrap().push(recorded);
    }
}

async fn echo(State(backend): State<MockBackend>, req: Request) -> Response {
    let method = req.method().to_string();
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let headers = req.headers().clone();
    let body = to_bytes(req.into_body(), usize::MAX).await.unwrap().to_vec();

    backend.push(Recorded {
        method,
        path_and_query: path_and_query.clone(),
        headers,
        body,
        fields: Vec::new(),
    });

    match path_and_query.as_str() {
        "/broken" => (StatusCode::INTERNAL_SERVER_ERROR, "database exploded").into_response(),
        "/slow" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late".into_response()
        }
        _ => (
            StatusCode::OK,
            [("x-backend", "mock"), ("connection", "keep-alive")],
            axum::Json(json!({ "path": path_and_query })),
        )
            .into_response(),
    }
}

async fn csv_import(
    State(backend): State<MockBackend>,
    Path(user_name): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut fields = Vec::new();
    let mut body = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        fields.push(field.name().unwrap_or_default().to_string());
        body.extend_from_slice(&field.bytes().await.unwrap());
    }

    backend.push(Recorded {
        method: "POST".to_string(),
        path_and_query: format!("/csv/import/{user_name}"),
        headers,
        body,
        fields,
    });

    if user_name == "reject" {
        return (StatusCode::UNPROCESSABLE_ENTITY, "bad header row").into_response();
    }
    if user_name == "silent" {
        return StatusCode::BAD_REQUEST.into_response();
    }

    axum::Json(json!({ "imported": 2, "user": user_name })).into_response()
}

/// Start the mock backend and return its origin
pub async fn spawn_mock_backend() -> (String, MockBackend) {
    let backend = MockBackend::default();
    let app = Router::new()
        .route("/csv/import/{user}", post(csv_import))
        .fallback(echo)
        .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{port}"), backend)
}

/// Gateway router over in-memory stores, pointed at `backend_origin`
pub struct TestGateway {
    pub app: Router,
    pub sessions: MemoryStore,
    pub credentials: MemoryStore,
}

impl TestGateway {
    pub fn new(config: ProxyConfig) -> Self {
        let credentials = MemoryStore::new();
        let sessions = MemoryStore::new();
        let auth_config = Arc::new(AuthConfig::default());
        let config = Arc::new(config);

        let auth_state = AuthAppState::new(
            credentials.clone(),
            sessions.clone(),
            NoopNotifier,
            auth_config.clone(),
        );
        let proxy_state = ProxyAppState::new(config.clone(), reqwest::Client::new());
        let guard_state = GuardState::new(sessions.clone(), auth_config, config);

        let routes = Router::new()
            .nest("/auth", auth_router(auth_state))
            .merge(proxy_router(proxy_state));

        Self {
            app: with_route_guard(routes, guard_state),
            sessions,
            credentials,
        }
    }

    pub fn with_backend(origin: &str) -> Self {
        Self::new(
            ProxyConfig {
                upstream_timeout: Duration::from_secs(1),
                ..ProxyConfig::default()
            }
            .with_backend_origin(origin),
        )
    }

    /// Store a session directly and return its token
    pub async fn session_for(&self, token: &str, user_name: &str) -> String {
        self.sessions
            .set(token, user_name, Some(TTL))
            .await
            .unwrap();
        token.to_string()
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder().method("GET").uri(uri);
    if let Some(token) = cookie {
        builder = builder.header("cookie", format!("HydraWatch={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Hand-rolled multipart body: `(name, file_name, content)` parts
pub fn multipart_body(boundary: &str, parts: &[(&str, Option<&str>, &str)]) -> String {
    let mut body = String::new();
    for (name, file_name, content) in parts {
        body.push_str(&format!("--{boundary}\r\n"));
        match file_name {
            Some(file_name) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                ));
                body.push_str("Content-Type: text/csv\r\n\r\n");
            }
            None => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                ));
            }
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    body
}

pub fn upload_request(parts: &[(&str, Option<&str>, &str)]) -> axum::http::Request<Body> {
    let boundary = "gatewayboundary";
    axum::http::Request::builder()
        .method("POST")
        .uri("/file")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(multipart_body(boundary, parts)))
        .unwrap()
}
