use super::service::{PresignedUpload, StorageError, UploadSigner};
use chrono::{DateTime, Utc};

/// Upload signer used when `AWS_*` settings are absent.
pub struct DisabledStorage;

impl UploadSigner for DisabledStorage {
    fn presign_put(
        &self,
        _key: &str,
        _content_type: &str,
        _now: DateTime<Utc>,
    ) -> Result<PresignedUpload, StorageError> {
        Err(StorageError::Disabled)
    }
}
