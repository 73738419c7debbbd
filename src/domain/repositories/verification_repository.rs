//! Repository trait for verification codes.

use crate::domain::entities::{VerificationChannel, VerificationCode};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for verification codes.
///
/// At most one code exists per `(channel, target)` pair.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVerificationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_verification.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Stores a code for the pair, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(
        &self,
        channel: VerificationChannel,
        target: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationCode, AppError>;

    /// Returns the live code for the pair, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(
        &self,
        channel: VerificationChannel,
        target: &str,
    ) -> Result<Option<VerificationCode>, AppError>;

    /// Deletes the pair's code if it equals `code` and has not expired,
    /// returning the removed record.
    ///
    /// Matching and deleting happen in one statement, so a code replaced by
    /// a concurrent [`upsert`](Self::upsert) can never be redeemed, and only
    /// one of several concurrent callers gets `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn redeem(
        &self,
        channel: VerificationChannel,
        target: &str,
        code: &str,
    ) -> Result<Option<VerificationCode>, AppError>;
}
