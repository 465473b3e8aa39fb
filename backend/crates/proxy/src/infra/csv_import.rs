//! CSV Import Client
//!
//! Re-packages a validated upload as a fresh multipart body holding only
//! the file and posts it to the backend import endpoint.

use std::time::Duration;

use axum::http::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::domain::upload::CsvUpload;
use crate::error::{ProxyError, ProxyResult};

/// What the backend made of an import
#[derive(Debug)]
pub enum ImportOutcome {
    /// 2xx; the backend's JSON object fields (empty if the body was not one)
    Accepted(Map<String, Value>),
    /// Non-2xx; status and raw body text
    Rejected { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
pub struct CsvImportClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl CsvImportClient {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub async fn import(&self, url: &str, upload: CsvUpload) -> ProxyResult<ImportOutcome> {
        let size = upload.data.len();
        let mut part = Part::stream_with_length(reqwest::Body::from(upload.data), size as u64)
            .file_name(upload.file_name.clone());
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| ProxyError::InvalidUpload(format!("Invalid content type: {e}")))?;
        }
        let form = Form::new().part("file", part);

        tracing::info!(
            url,
            file_name = %upload.file_name,
            size,
            user_name = %upload.user_name,
            "Forwarding CSV import"
        );

        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let fields = match response.json::<Value>().await {
                Ok(Value::Object(fields)) => fields,
                Ok(_) | Err(_) => Map::new(),
            };
            tracing::info!(status = status.as_u16(), "CSV import accepted");
            return Ok(ImportOutcome::Accepted(fields));
        }

        let body = response.text().await.unwrap_or_default();
        let logged = if body.is_empty() { "No error body" } else { body.as_str() };
        tracing::warn!(
            status = status.as_u16(),
            body = logged,
            "CSV import rejected by backend"
        );
        Ok(ImportOutcome::Rejected { status, body })
    }
}
