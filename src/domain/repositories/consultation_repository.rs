//! Repository trait for consultation requests.

use crate::domain::entities::{ConsultationRequest, NewConsultationRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for consultation requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgConsultationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConsultationRepository: Send + Sync {
    /// Stores a new request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, request: NewConsultationRequest)
    -> Result<ConsultationRequest, AppError>;

    /// Returns every request, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_all(&self) -> Result<Vec<ConsultationRequest>, AppError>;

    /// Deletes a request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the request does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
