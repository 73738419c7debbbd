//! Business logic services for the application layer.

pub mod auth_service;
pub mod consultation_service;
pub mod listing_service;
pub mod upload_service;
pub mod verification_service;

pub use auth_service::AuthService;
pub use consultation_service::ConsultationService;
pub use listing_service::ListingService;
pub use upload_service::{UploadService, UploadTicket};
pub use verification_service::VerificationService;
