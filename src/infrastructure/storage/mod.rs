//! Object storage upload signing.
//!
//! Provides an [`UploadSigner`] trait with two implementations:
//! - [`S3Presigner`] - AWS Signature V4 query-string presigning, computed locally
//! - [`DisabledStorage`] - Installed when no bucket is configured

mod disabled;
mod s3;
mod service;
pub mod sigv4;

pub use disabled::DisabledStorage;
pub use s3::{S3Config, S3Presigner};
pub use service::{PresignedUpload, StorageError, UploadSigner};

#[cfg(test)]
pub use service::MockUploadSigner;
