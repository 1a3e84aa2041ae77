//! Object storage adapter
//!
//! The image store is an opaque HTTP service: POST the bytes with their
//! content type, get the durable public URL back.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::entities::ImageUpload;
use crate::domain::ports::ObjectStorage;
use crate::error::StorageError;

pub struct HttpObjectStorage {
    http: Client,
    base_url: String,
}

impl HttpObjectStorage {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn upload_image(&self, image: &ImageUpload) -> Result<String, StorageError> {
        let response = self
            .http
            .post(self.upload_url())
            .header(CONTENT_TYPE, image.format.content_type())
            .body(image.bytes.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::Deserialization(e.to_string()))?;
        Ok(parsed.url)
    }
}
