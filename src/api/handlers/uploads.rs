//! Handler for pre-signed upload URLs.

use axum::{Json, extract::State};

use crate::api::dto::upload::{PresignedUrlQuery, PresignedUrlResponse};
use crate::api::extractors::{Authorized, RequestUploadUrl, ValidatedQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Returns a URL the client can `PUT` one file to, valid for 60 seconds.
///
/// # Endpoint
///
/// `GET /uploads/presigned-url?filename=photo.jpg&filetype=image/jpeg`
///
/// The upload must send the same `Content-Type` as `filetype`.
///
/// # Response
///
/// ```json
/// {
///   "uploadUrl": "https://bucket.s3.ap-northeast-2.amazonaws.com/uploads/1700000000000-photo.jpg?X-Amz-...",
///   "publicUrl": "https://bucket.s3.ap-northeast-2.amazonaws.com/uploads/1700000000000-photo.jpg",
///   "key": "uploads/1700000000000-photo.jpg"
/// }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized without a valid token.
/// Returns 502 Bad Gateway if object storage is not configured.
pub async fn presigned_url_handler(
    State(state): State<AppState>,
    _auth: Authorized<RequestUploadUrl>,
    ValidatedQuery(query): ValidatedQuery<PresignedUrlQuery>,
) -> Result<Json<PresignedUrlResponse>, AppError> {
    let ticket = state
        .upload_service
        .create_presigned_url(&query.filename, &query.filetype)?;

    Ok(Json(ticket.into()))
}
