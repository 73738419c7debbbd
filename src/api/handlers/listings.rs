//! Handlers for listing endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::listing::{
    CreateListingRequest, LikeResponse, ListingResponse, ListingsQuery, StatsResponse,
    UpdateListingRequest,
};
use crate::api::dto::message::MessageResponse;
use crate::api::extractors::{
    Authorized, LikeListings, ManageListings, ValidatedJson, ValidatedQuery, Viewer,
};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a listing.
///
/// # Endpoint
///
/// `POST /listings` (administrators)
///
/// `status` defaults to `DRAFT`, counters start at zero.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 401/403 if the caller is not an administrator.
pub async fn create_listing_handler(
    State(state): State<AppState>,
    _auth: Authorized<ManageListings>,
    ValidatedJson(payload): ValidatedJson<CreateListingRequest>,
) -> Result<(StatusCode, Json<ListingResponse>), AppError> {
    let listing = state.listing_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(listing.into())))
}

/// Lists listings.
///
/// # Endpoint
///
/// `GET /listings?region&category&keyMoneyLte&sortBy&order&status`
///
/// Anonymous callers and users only ever see `PUBLISHED` listings and their
/// `status` parameter is ignored. Administrators may filter by any status and
/// get weekly-best listings first.
pub async fn list_listings_handler(
    State(state): State<AppState>,
    viewer: Viewer,
    ValidatedQuery(query): ValidatedQuery<ListingsQuery>,
) -> Result<Json<Vec<ListingResponse>>, AppError> {
    let listings = state
        .listing_service
        .get_all(query.into(), viewer.role())
        .await?;

    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

/// Returns up to three listings promoted right now.
///
/// # Endpoint
///
/// `GET /listings/featured`
pub async fn featured_listings_handler(
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<Json<Vec<ListingResponse>>, AppError> {
    let listings = state.listing_service.get_featured(viewer.role()).await?;
    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

/// Published-listing counters.
///
/// # Endpoint
///
/// `GET /listings/stats`
///
/// # Response
///
/// ```json
/// { "totalCount": 42, "newThisWeekCount": 3 }
/// ```
pub async fn listing_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.listing_service.get_stats().await?;
    Ok(Json(stats.into()))
}

/// Returns one listing and counts the view.
///
/// # Endpoint
///
/// `GET /listings/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the listing does not exist, or is unpublished and
/// hidden from the caller.
pub async fn get_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    viewer: Viewer,
) -> Result<Json<ListingResponse>, AppError> {
    let listing = state.listing_service.get_by_id(id, viewer.role()).await?;
    Ok(Json(listing.into()))
}

/// Partially updates a listing.
///
/// # Endpoint
///
/// `PATCH /listings/{id}` (administrators)
///
/// Absent fields are unchanged; `null` clears `utilityCost`, `otherCost`,
/// `deliveryPercentage`, `featuredStart` and `featuredEnd`.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 404 Not Found if the listing does not exist.
pub async fn update_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _auth: Authorized<ManageListings>,
    ValidatedJson(payload): ValidatedJson<UpdateListingRequest>,
) -> Result<Json<ListingResponse>, AppError> {
    let listing = state.listing_service.update(id, payload.into()).await?;
    Ok(Json(listing.into()))
}

/// Deletes a listing and its likes.
///
/// # Endpoint
///
/// `DELETE /listings/{id}` (administrators)
///
/// # Errors
///
/// Returns 404 Not Found if the listing does not exist.
pub async fn delete_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    _auth: Authorized<ManageListings>,
) -> Result<Json<MessageResponse>, AppError> {
    state.listing_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Listing deleted")))
}

/// Likes a listing, or removes the caller's like.
///
/// # Endpoint
///
/// `POST /listings/{id}/like`
///
/// # Response
///
/// ```json
/// { "status": "liked", "message": "Listing liked", "likeCount": 4 }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized without a valid token.
/// Returns 404 Not Found if the listing does not exist.
pub async fn like_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    auth: Authorized<LikeListings>,
) -> Result<Json<LikeResponse>, AppError> {
    let toggle = state.listing_service.toggle_like(auth.user.id, id).await?;
    Ok(Json(toggle.into()))
}
