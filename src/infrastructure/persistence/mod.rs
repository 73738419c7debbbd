//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! runtime queries mapped with `FromRow`.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Local and social accounts
//! - [`PgListingRepository`] - Listings, likes and counters
//! - [`PgConsultationRepository`] - Consultation requests
//! - [`PgVerificationRepository`] - Phone verification codes

pub mod pg_consultation_repository;
pub mod pg_listing_repository;
pub mod pg_user_repository;
pub mod pg_verification_repository;

pub use pg_consultation_repository::PgConsultationRepository;
pub use pg_listing_repository::PgListingRepository;
pub use pg_user_repository::PgUserRepository;
pub use pg_verification_repository::PgVerificationRepository;
