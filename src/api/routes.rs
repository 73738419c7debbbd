//! API route configuration.
//!
//! Routes do not carry their own authentication layer. Identity is resolved
//! once for the whole router by [`crate::api::middleware::auth`], and each
//! handler states what it needs through its extractors.

use crate::api::handlers::{
    check_code_handler, create_consultation_handler, create_listing_handler,
    delete_consultation_handler, delete_listing_handler, featured_listings_handler,
    get_listing_handler, kakao_callback_handler, kakao_login_handler, like_listing_handler,
    list_consultations_handler, list_listings_handler, listing_stats_handler, login_handler,
    me_handler, my_likes_handler, presigned_url_handler, register_handler, send_code_handler,
    update_listing_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Account, listing, consultation and upload routes.
///
/// # Endpoints
///
/// - `POST   /auth/register`           - Register a password account
/// - `POST   /auth/login`              - Obtain a bearer token
/// - `GET    /auth/me`                 - Caller profile (bearer)
/// - `GET    /auth/kakao`              - Start Kakao login
/// - `GET    /auth/kakao/callback`     - Finish Kakao login
/// - `GET    /listings`                - List listings (optional bearer)
/// - `POST   /listings`                - Create a listing (admin)
/// - `GET    /listings/featured`       - Current weekly-best listings
/// - `GET    /listings/stats`          - Published listing counters
/// - `GET    /listings/{id}`           - One listing, counts a view
/// - `PATCH  /listings/{id}`           - Partial update (admin)
/// - `DELETE /listings/{id}`           - Delete (admin)
/// - `POST   /listings/{id}/like`      - Toggle the caller's like (bearer)
/// - `GET    /users/me/likes`          - Listings the caller liked (bearer)
/// - `POST   /consultations`           - Submit a consultation request
/// - `GET    /consultations`           - List requests (admin)
/// - `DELETE /consultations/{id}`      - Delete a request (admin)
/// - `GET    /uploads/presigned-url`   - Signed upload URL (bearer)
pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/me", get(me_handler))
        .route("/auth/kakao", get(kakao_login_handler))
        .route("/auth/kakao/callback", get(kakao_callback_handler))
        .route(
            "/listings",
            get(list_listings_handler).post(create_listing_handler),
        )
        .route("/listings/featured", get(featured_listings_handler))
        .route("/listings/stats", get(listing_stats_handler))
        .route(
            "/listings/{id}",
            get(get_listing_handler)
                .patch(update_listing_handler)
                .delete(delete_listing_handler),
        )
        .route("/listings/{id}/like", post(like_listing_handler))
        .route("/users/me/likes", get(my_likes_handler))
        .route(
            "/consultations",
            get(list_consultations_handler).post(create_consultation_handler),
        )
        .route("/consultations/{id}", delete(delete_consultation_handler))
        .route("/uploads/presigned-url", get(presigned_url_handler))
}

/// Phone verification routes. Each call may send an SMS, so the top-level
/// router wraps these in [`crate::api::middleware::rate_limit::verification_layer`].
///
/// # Endpoints
///
/// - `POST /verification/send`  - Send a code
/// - `POST /verification/check` - Redeem a code
pub fn verification_routes() -> Router<AppState> {
    Router::new()
        .route("/verification/send", post(send_code_handler))
        .route("/verification/check", post(check_code_handler))
}
