//! Handlers for the caller's own resources.

use axum::{Json, extract::State};

use crate::api::dto::listing::ListingResponse;
use crate::api::extractors::{Authorized, LikeListings};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the listings the caller has liked, most recent like first.
///
/// # Endpoint
///
/// `GET /users/me/likes`
///
/// Non-administrators only see published listings here.
///
/// # Errors
///
/// Returns 401 Unauthorized without a valid token.
/// Returns 404 Not Found if the account no longer exists.
pub async fn my_likes_handler(
    State(state): State<AppState>,
    auth: Authorized<LikeListings>,
) -> Result<Json<Vec<ListingResponse>>, AppError> {
    let listings = state
        .listing_service
        .liked_by(auth.user.id, auth.user.role)
        .await?;

    Ok(Json(listings.into_iter().map(Into::into).collect()))
}
