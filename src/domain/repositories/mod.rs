//! Repository trait definitions for the domain layer.
//!
//! Traits define the data contracts; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Local and social accounts
//! - [`ListingRepository`] - Listings, likes and counters
//! - [`ConsultationRepository`] - Consultation requests
//! - [`VerificationRepository`] - Phone verification codes
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod consultation_repository;
pub mod listing_repository;
pub mod user_repository;
pub mod verification_repository;

pub use consultation_repository::ConsultationRepository;
pub use listing_repository::{ListingFilter, ListingQuery, ListingRepository, SortField, SortOrder};
pub use user_repository::UserRepository;
pub use verification_repository::VerificationRepository;

#[cfg(test)]
pub use consultation_repository::MockConsultationRepository;
#[cfg(test)]
pub use listing_repository::MockListingRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use verification_repository::MockVerificationRepository;
