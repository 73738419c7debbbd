//! Consultation request intake and administration.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::{ConsultationRequest, NewConsultationRequest};
use crate::domain::repositories::ConsultationRepository;
use crate::error::AppError;

/// Access control for listing and deleting requests is enforced by the API
/// layer before these methods are called.
pub struct ConsultationService<R: ConsultationRepository> {
    repository: Arc<R>,
}

impl<R: ConsultationRepository> ConsultationService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        request: NewConsultationRequest,
    ) -> Result<ConsultationRequest, AppError> {
        let created = self.repository.create(request).await?;
        info!(consultation_id = created.id, "Consultation request received");
        Ok(created)
    }

    /// All requests, newest first.
    pub async fn get_all(&self) -> Result<Vec<ConsultationRequest>, AppError> {
        self.repository.find_all().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the request does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
