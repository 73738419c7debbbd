//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod consultations;
pub mod health;
pub mod listings;
pub mod uploads;
pub mod users;
pub mod verification;

pub use auth::{
    kakao_callback_handler, kakao_login_handler, login_handler, me_handler, register_handler,
};
pub use consultations::{
    create_consultation_handler, delete_consultation_handler, list_consultations_handler,
};
pub use health::health_handler;
pub use listings::{
    create_listing_handler, delete_listing_handler, featured_listings_handler,
    get_listing_handler, like_listing_handler, list_listings_handler, listing_stats_handler,
    update_listing_handler,
};
pub use uploads::presigned_url_handler;
pub use users::my_likes_handler;
pub use verification::{check_code_handler, send_code_handler};
