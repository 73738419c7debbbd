//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, provider clients and business rules,
//! and give HTTP handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Accounts, access tokens, social login
//! - [`services::listing_service::ListingService`] - Listing catalogue, likes, stats
//! - [`services::consultation_service::ConsultationService`] - Consultation requests
//! - [`services::verification_service::VerificationService`] - Phone verification codes
//! - [`services::upload_service::UploadService`] - Pre-signed upload URLs

pub mod services;
