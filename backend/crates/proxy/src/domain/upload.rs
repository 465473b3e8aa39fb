//! CSV Upload
//!
//! Validation of a multipart upload before anything is sent upstream.

use axum::body::Bytes;

use crate::error::ProxyError;

/// The `file` part of an upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// An upload that passed every check
#[derive(Debug, Clone)]
pub struct CsvUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
    pub user_name: String,
}

impl CsvUpload {
    /// Check, in order: file present, user name present, `.csv` extension.
    pub fn validate(
        file: Option<UploadedFile>,
        user_name: Option<String>,
    ) -> Result<Self, ProxyError> {
        let file = file.ok_or_else(|| ProxyError::InvalidUpload("Missing file".to_string()))?;

        let user_name = user_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ProxyError::InvalidUpload("Missing or invalid username".to_string()))?;

        let file_name = file.file_name.unwrap_or_default();
        if !file_name.to_ascii_lowercase().ends_with(".csv") {
            return Err(ProxyError::InvalidUpload(
                "Only .csv files are accepted".to_string(),
            ));
        }

        Ok(Self {
            file_name,
            content_type: file.content_type,
            data: file.data,
            user_name,
        })
    }
}
