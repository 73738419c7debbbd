//! Handlers for consultation requests.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::consultation::CreateConsultationRequest;
use crate::api::dto::message::MessageResponse;
use crate::api::extractors::{Authorized, ManageConsultations, ReadConsultations, ValidatedJson};
use crate::domain::entities::ConsultationRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Submits a consultation request. No account needed.
///
/// # Endpoint
///
/// `POST /consultations`
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn create_consultation_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateConsultationRequest>,
) -> Result<(StatusCode, Json<ConsultationRequest>), AppError> {
    let created = state.consultation_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Lists consultation requests, newest first.
///
/// # Endpoint
///
/// `GET /consultations` (administrators)
pub async fn list_consultations_handler(
    State(state): State<AppState>,
    _auth: Authorized<ReadConsultations>,
) -> Result<Json<Vec<ConsultationRequest>>, AppError> {
    Ok(Json(state.consultation_service.get_all().await?))
}

/// # Endpoint
///
/// `DELETE /consultations/{id}` (administrators)
///
/// # Errors
///
/// Returns 404 Not Found if the request does not exist.
pub async fn delete_consultation_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _auth: Authorized<ManageConsultations>,
) -> Result<Json<MessageResponse>, AppError> {
    state.consultation_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Consultation request deleted")))
}
