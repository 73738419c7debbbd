//! Handlers for phone verification. Both routes are rate limited per client IP.

use axum::{Json, extract::State};

use crate::api::dto::message::MessageResponse;
use crate::api::dto::verification::{CheckCodeRequest, SendCodeRequest, SendCodeResponse};
use crate::api::extractors::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::phone::normalize_phone;

/// Sends a six-digit code to a phone number, replacing any earlier code.
///
/// # Endpoint
///
/// `POST /verification/send`
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed phone number.
/// Returns 502 Bad Gateway if the SMS provider fails or is not configured.
pub async fn send_code_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SendCodeRequest>,
) -> Result<Json<SendCodeResponse>, AppError> {
    let phone = normalize_phone(&payload.phone);
    let expires_at = state.verification_service.send_code(&phone).await?;

    Ok(Json(SendCodeResponse {
        message: "Verification code sent".to_string(),
        expires_at,
    }))
}

/// Redeems a code. A code works once.
///
/// # Endpoint
///
/// `POST /verification/check`
///
/// # Errors
///
/// Returns 404 Not Found if the code is wrong or already used.
/// Returns 410 Gone if the code has expired.
pub async fn check_code_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CheckCodeRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let phone = normalize_phone(&payload.phone);
    state
        .verification_service
        .check_code(&phone, &payload.code)
        .await?;

    Ok(Json(MessageResponse::new("Phone number verified")))
}
