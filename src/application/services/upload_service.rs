//! Pre-signed upload URLs for listing images.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::AppError;
use crate::infrastructure::storage::UploadSigner;

/// A signed upload slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub upload_url: String,
    pub public_url: String,
    pub key: String,
}

/// Reduces a client-supplied filename to a safe final path segment.
///
/// Directory components are dropped; anything other than letters, digits,
/// `.`, `-` and `_` becomes `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Storage key for an upload started at `now`.
pub fn object_key(filename: &str, now: DateTime<Utc>) -> String {
    format!(
        "uploads/{}-{}",
        now.timestamp_millis(),
        sanitize_filename(filename)
    )
}

pub struct UploadService {
    signer: Arc<dyn UploadSigner>,
}

impl UploadService {
    pub fn new(signer: Arc<dyn UploadSigner>) -> Self {
        Self { signer }
    }

    /// Signs a one-minute `PUT` for a new object. Nothing is persisted.
    ///
    /// Keys are unique per millisecond and filename only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if no object store is configured.
    pub fn create_presigned_url(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<UploadTicket, AppError> {
        let now = Utc::now();
        let key = object_key(filename, now);

        let signed = self
            .signer
            .presign_put(&key, content_type, now)
            .map_err(|e| {
                AppError::upstream("Upload signing unavailable", json!({ "reason": e.to_string() }))
            })?;

        Ok(UploadTicket {
            upload_url: signed.upload_url,
            public_url: signed.public_url,
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{MockUploadSigner, PresignedUpload, StorageError};
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("cover photo.png"), "cover_photo.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\images\\a.jpg"), "a.jpg");
        assert_eq!(sanitize_filename("매장.jpg"), "매장.jpg");
        assert_eq!(sanitize_filename(".."), "file");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn test_object_key() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(object_key("a.png", now), "uploads/1700000000123-a.png");
    }

    #[test]
    fn test_create_presigned_url() {
        let mut signer = MockUploadSigner::new();
        signer
            .expect_presign_put()
            .withf(|key, content_type, _| {
                key.starts_with("uploads/") && key.ends_with("-a.png") && content_type == "image/png"
            })
            .times(1)
            .returning(|key, _, _| {
                Ok(PresignedUpload {
                    upload_url: format!("https://bucket/{key}?sig"),
                    public_url: format!("https://bucket/{key}"),
                })
            });

        let ticket = UploadService::new(Arc::new(signer))
            .create_presigned_url("a.png", "image/png")
            .unwrap();

        assert_eq!(ticket.public_url, format!("https://bucket/{}", ticket.key));
    }

    #[test]
    fn test_create_presigned_url_disabled() {
        let mut signer = MockUploadSigner::new();
        signer
            .expect_presign_put()
            .returning(|_, _, _| Err(StorageError::Disabled));

        let result = UploadService::new(Arc::new(signer)).create_presigned_url("a.png", "image/png");

        assert!(matches!(result.unwrap_err(), AppError::Upstream { .. }));
    }
}
