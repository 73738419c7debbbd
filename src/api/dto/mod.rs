//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs declare their constraints with `validator` and are checked by
//! [`crate::api::extractors::ValidatedJson`] / [`crate::api::extractors::ValidatedQuery`].
//! JSON field names are camelCase throughout.

pub mod auth;
pub mod consultation;
pub mod health;
pub mod listing;
pub mod message;
pub mod upload;
pub mod verification;
