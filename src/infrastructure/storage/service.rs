//! Upload signer trait and types.

use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object storage is not configured")]
    Disabled,
}

/// A signed, time-limited write URL and the address the object will have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUpload {
    pub upload_url: String,
    pub public_url: String,
}

/// Produces pre-signed `PUT` URLs for object keys.
///
/// Signing is local; no request reaches the object store until the client
/// uploads.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::S3Presigner`] - S3 and S3-compatible stores
/// - [`crate::infrastructure::storage::DisabledStorage`] - Always fails with [`StorageError::Disabled`]
#[cfg_attr(test, mockall::automock)]
pub trait UploadSigner: Send + Sync {
    /// Signs a `PUT` of `key` with the given `Content-Type`, valid from `now`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Disabled`] if no store is configured.
    fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        now: DateTime<Utc>,
    ) -> Result<PresignedUpload, StorageError>;
}
