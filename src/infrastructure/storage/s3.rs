//! S3 pre-signed `PUT` URLs.

use super::service::{PresignedUpload, StorageError, UploadSigner};
use super::sigv4::{self, Credentials, PresignRequest};
use chrono::{DateTime, Utc};
use tracing::info;

/// Pre-signed URLs are valid for one minute.
pub const UPLOAD_URL_TTL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct S3Config {
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Public base URL (for example a CDN) objects are served from.
    /// Defaults to the virtual-hosted bucket URL.
    pub public_base_url: Option<String>,
}

pub struct S3Presigner {
    host: String,
    region: String,
    public_base_url: String,
    credentials: Credentials,
}

impl S3Presigner {
    pub fn new(config: S3Config) -> Self {
        let host = format!("{}.s3.{}.amazonaws.com", config.bucket, config.region);
        let public_base_url = config
            .public_base_url
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://{host}"));

        info!("✓ Object storage: s3://{} ({})", config.bucket, config.region);

        Self {
            host,
            region: config.region,
            public_base_url,
            credentials: Credentials {
                access_key_id: config.access_key_id,
                secret_access_key: config.secret_access_key,
            },
        }
    }
}

impl UploadSigner for S3Presigner {
    fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        now: DateTime<Utc>,
    ) -> Result<PresignedUpload, StorageError> {
        let path = format!("/{key}");
        let headers = [("content-type", content_type)];

        let upload_url = sigv4::presign(
            &PresignRequest {
                method: "PUT",
                host: &self.host,
                path: &path,
                headers: &headers,
                region: &self.region,
                service: "s3",
                time: now,
                expires_secs: UPLOAD_URL_TTL_SECS,
            },
            &self.credentials,
        );

        Ok(PresignedUpload {
            upload_url,
            public_url: format!(
                "{}{}",
                self.public_base_url,
                sigv4::uri_encode(&path, true)
            ),
        })
    }
}
