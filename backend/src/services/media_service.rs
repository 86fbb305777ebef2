//! Media storage integration.
//!
//! Uploaded files (avatars, cover images) are pushed to an external media
//! service which returns a public URL. The service is behind a trait so the
//! HTTP implementation can be swapped out in tests.

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};
use async_trait::async_trait;
use serde::Deserialize;

/// An uploaded file as received from a multipart request.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Storage backend for user media.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Stores the file and returns its public URL.
    async fn upload(&self, file: &FileUpload) -> ServiceResult<String>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// `MediaStore` implementation backed by the HTTP media service.
pub struct HttpMediaService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMediaService {
    /// Creates a new HttpMediaService from application configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.media_service_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaService {
    async fn upload(&self, file: &FileUpload) -> ServiceResult<String> {
        let url = format!("{}/upload", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("filename", file.filename.as_str())])
            .header("content-type", file.content_type.as_str())
            .body(file.data.clone())
            .send()
            .await
            .map_err(|e| ServiceError::external_service(format!("Media upload failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ServiceError::external_service(format!(
                "Media service returned status {}",
                response.status()
            )));
        }

        let upload: UploadResponse = response.json().await.map_err(|e| {
            ServiceError::external_service(format!("Invalid media service response: {}", e))
        })?;

        Ok(upload.url)
    }
}
