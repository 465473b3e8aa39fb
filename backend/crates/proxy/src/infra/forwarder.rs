//! Upstream Forwarder
//!
//! Relays one request to an upstream origin and streams the answer back.
//! Only `Accept` and `Content-Type` travel upstream; cookies and every other
//! client header stay at the gateway.

use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, header};
use axum::response::Response;

use crate::error::{ProxyError, ProxyResult};

/// Connection-scoped headers that must not cross the proxy
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn default_media_type() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// Outbound request description
#[derive(Debug)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: String,
    pub accept: Option<HeaderValue>,
    pub content_type: Option<HeaderValue>,
    pub body: Option<Body>,
}

impl UpstreamRequest {
    /// Copy the allow-listed headers from an inbound request
    pub fn from_inbound(method: Method, url: String, headers: &HeaderMap, body: Body) -> Self {
        let carries_body = !matches!(method, Method::GET | Method::HEAD);
        Self {
            accept: headers.get(header::ACCEPT).cloned(),
            content_type: headers.get(header::CONTENT_TYPE).cloned(),
            body: carries_body.then_some(body),
            method,
            url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamForwarder {
    client: reqwest::Client,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub async fn forward(&self, request: UpstreamRequest) -> ProxyResult<Response> {
        let UpstreamRequest {
            method,
            url,
            accept,
            content_type,
            body,
        } = request;

        tracing::debug!(%method, url = %url, "Forwarding upstream");

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .timeout(self.timeout)
            .header(header::ACCEPT, accept.unwrap_or_else(default_media_type))
            .header(
                header::CONTENT_TYPE,
                content_type.unwrap_or_else(default_media_type),
            )
            .header(header::CACHE_CONTROL, "no-store");

        if let Some(body) = body {
            builder = builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let upstream = builder.send().await.map_err(|e| {
            let err = ProxyError::from(e);
            tracing::error!(%method, url = %url, error = %err, "Upstream request failed");
            err
        })?;

        let status = upstream.status();
        if !status.is_success() {
            tracing::warn!(
                %method,
                url = %url,
                status = status.as_u16(),
                "Upstream answered with error status"
            );
        }

        let mut response = Response::builder().status(status);
        if let Some(headers) = response.headers_mut() {
            copy_end_to_end_headers(upstream.headers(), headers);
        }

        response
            .body(Body::from_stream(upstream.bytes_stream()))
            .map_err(|e| ProxyError::Internal(format!("failed to build response: {e}")))
    }
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Copy upstream headers minus hop-by-hop ones, including any the upstream
/// listed in its own `Connection` header
fn copy_end_to_end_headers(from: &HeaderMap, to: &mut HeaderMap) {
    let listed: Vec<String> = from
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .collect();

    for (name, value) in from {
        if is_hop_by_hop(name) || listed.iter().any(|l| l == name.as_str()) {
            continue;
        }
        to.append(name.clone(), value.clone());
    }
}
