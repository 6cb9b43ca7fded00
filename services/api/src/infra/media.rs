use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::domain::repository::MediaStore;
use crate::domain::types::UploadedFile;
use crate::error::ApiServiceError;

/// Unsigned uploads to Cloudinary through an upload preset.
#[derive(Clone)]
pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    cloud_name: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

impl CloudinaryMediaStore {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            cloud_name: config.cloudinary_cloud_name.clone(),
            upload_preset: config.cloudinary_upload_preset.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/auto/upload",
            self.cloud_name
        )
    }
}

impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, file: UploadedFile) -> Result<Option<String>, ApiServiceError> {
        if self.cloud_name.is_empty() || self.upload_preset.is_empty() {
            tracing::warn!("cloudinary not configured, skipping upload");
            return Ok(None);
        }

        let mut part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.unwrap_or_else(|| "upload".to_owned()));
        if let Some(content_type) = file.content_type.as_deref() {
            part = part.mime_str(content_type).map_err(|e| {
                tracing::warn!(error = %e, "rejected upload content type");
                ApiServiceError::AvatarUploadFailed
            })?;
        }
        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "cloudinary request failed");
                ApiServiceError::AvatarUploadFailed
            })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "cloudinary rejected upload");
            return Err(ApiServiceError::AvatarUploadFailed);
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "cloudinary response unreadable");
            ApiServiceError::AvatarUploadFailed
        })?;
        Ok(body.secure_url.or(body.url))
    }
}
