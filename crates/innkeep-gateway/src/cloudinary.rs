//! Cloudinary signed image uploads.
//!
//! Files are sent as base64 data URIs; the request is signed with
//! SHA-1 over the sorted parameters followed by the API secret.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use innkeep_core::error::InnkeepResult;
use innkeep_core::gateway::{ImageUpload, MediaStore};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::{info, warn};

use crate::config::CloudinaryConfig;
use crate::error::GatewayError;

const SERVICE: &str = "cloudinary";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

fn data_uri(image: &ImageUpload) -> String {
    format!(
        "data:{};base64,{}",
        image.content_type,
        STANDARD.encode(&image.bytes)
    )
}

/// Hex SHA-1 of `timestamp=<ts><secret>`.
fn sign(timestamp: i64, api_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("timestamp={timestamp}{api_secret}").as_bytes());
    hex::encode(hasher.finalize())
}

pub struct CloudinaryMediaStore {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryMediaStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            http: crate::http_client(config.timeout_secs)?,
            config,
        })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name
        )
    }
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, image: ImageUpload) -> InnkeepResult<String> {
        let timestamp = Utc::now().timestamp();
        let form = [
            ("file", data_uri(&image)),
            ("api_key", self.config.api_key.clone()),
            ("timestamp", timestamp.to_string()),
            ("signature", sign(timestamp, &self.config.api_secret)),
        ];

        let response = self
            .http
            .post(self.upload_url())
            .form(&form[..])
            .send()
            .await
            .map_err(GatewayError::from)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "no error message".into());
            warn!(status = status.as_u16(), %message, "Image upload failed");
            return Err(GatewayError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: UploadResponse = response.json().await.map_err(|e| GatewayError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })?;

        let url = body
            .secure_url
            .or(body.url)
            .ok_or_else(|| GatewayError::Decode {
                service: SERVICE,
                message: "upload response has no url".into(),
            })?;
        info!(%url, bytes = image.bytes.len(), "Image uploaded");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_sha1_of_timestamp_and_secret() {
        // sha1("timestamp=1315060510abcd")
        assert_eq!(
            sign(1_315_060_510, "abcd"),
            "a21ad0f63beb4de2e5575204b79ab90bffb02c10"
        );
    }

    #[test]
    fn data_uri_embeds_mime_type() {
        let image = ImageUpload {
            file_name: Some("a.png".into()),
            content_type: "image/png".into(),
            bytes: b"hi".to_vec(),
        };
        assert_eq!(data_uri(&image), "data:image/png;base64,aGk=");
    }

    #[test]
    fn upload_url_uses_cloud_name() {
        let store =
            CloudinaryMediaStore::new(CloudinaryConfig::new("demo", "key", "secret")).unwrap();
        assert_eq!(
            store.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }
}
