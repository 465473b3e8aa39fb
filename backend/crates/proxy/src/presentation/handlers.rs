//! HTTP Handlers

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use std::sync::Arc;

use kernel::error::app_error::AppError;

use crate::application::config::ProxyConfig;
use crate::domain::upload::{CsvUpload, UploadedFile};
use crate::error::{ProxyError, ProxyResult};
use crate::infra::{CsvImportClient, ImportOutcome, UpstreamForwarder, UpstreamRequest};

/// Shared state for proxy handlers
#[derive(Clone)]
pub struct ProxyAppState {
    pub config: Arc<ProxyConfig>,
    pub forwarder: UpstreamForwarder,
    pub csv_import: CsvImportClient,
}

impl ProxyAppState {
    pub fn new(config: Arc<ProxyConfig>, client: reqwest::Client) -> Self {
        Self {
            forwarder: UpstreamForwarder::new(client.clone(), config.upstream_timeout),
            csv_import: CsvImportClient::new(client, config.upstream_timeout),
            config,
        }
    }
}

// ============================================================================
// Backend API passthrough
// ============================================================================

/// GET|POST /api/router/{*path}
pub async fn proxy_api(
    State(state): State<ProxyAppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> ProxyResult<Response> {
    let url = state.config.backend_api_url(uri.path(), uri.query());

    state
        .forwarder
        .forward(UpstreamRequest::from_inbound(method, url, &headers, body))
        .await
}

// ============================================================================
// Page fallback
// ============================================================================

/// Anything no other route matched
pub async fn forward_page(
    State(state): State<ProxyAppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let Some(url) = state.config.frontend_url(uri.path(), uri.query()) else {
        return AppError::not_found("Not found").into_response();
    };

    state
        .forwarder
        .forward(UpstreamRequest::from_inbound(method, url, &headers, body))
        .await
        .into_response()
}

// ============================================================================
// CSV upload
// ============================================================================

/// POST /file
pub async fn upload_file(
    State(state): State<ProxyAppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ProxyResult<Response> {
    let multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Rejected upload body");
        ProxyError::InvalidUpload("Invalid multipart body".to_string())
    })?;

    let (file, user_name) = read_upload_form(multipart).await?;
    let upload = CsvUpload::validate(file, user_name)?;

    let url = state.config.csv_import_url(&upload.user_name);

    match state.csv_import.import(&url, upload).await? {
        ImportOutcome::Accepted(fields) => {
            let mut body = Map::new();
            body.insert(
                "message".to_string(),
                Value::String("Upload successful".to_string()),
            );
            body.extend(fields);
            Ok((StatusCode::OK, Json(Value::Object(body))).into_response())
        }
        ImportOutcome::Rejected { status, body } => {
            let body = if body.is_empty() {
                "Upload failed on backend".to_string()
            } else {
                body
            };
            Ok((status, body).into_response())
        }
    }
}

async fn read_upload_form(
    mut multipart: Multipart,
) -> ProxyResult<(Option<UploadedFile>, Option<String>)> {
    let mut file = None;
    let mut user_name = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            Some("username") => {
                user_name = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok((file, user_name))
}

fn multipart_error(err: MultipartError) -> ProxyError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ProxyError::UploadTooLarge
    } else {
        tracing::debug!(error = %err, "Malformed multipart body");
        ProxyError::InvalidUpload("Invalid multipart body".to_string())
    }
}

// ============================================================================
// Health
// ============================================================================

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}
