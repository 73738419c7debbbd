//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`User`] - A local or social account with a [`Role`]
//! - [`Listing`] - A leasable business property with view/like counters
//! - [`ConsultationRequest`] - An anonymous inquiry
//! - [`VerificationCode`] - A short-lived phone verification code
//!
//! # Design Pattern
//!
//! Creation inputs are separate structs (`NewUser`, `NewListing`,
//! `NewConsultationRequest`); partial updates use [`ListingPatch`].

pub mod consultation;
pub mod listing;
pub mod user;
pub mod verification;

pub use consultation::{ConsultationRequest, Gender, NewConsultationRequest};
pub use listing::{
    Category, LikeOutcome, LikeToggle, Listing, ListingDetails, ListingPatch, ListingStats,
    ListingStatus, NewListing, Region,
};
pub use user::{NewUser, Role, SocialIdentity, User};
pub use verification::{VerificationChannel, VerificationCode};
