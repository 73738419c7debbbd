//! Helpers shared across layers.
//!
//! - [`jwt`] - Access token signing and verification
//! - [`password`] - Argon2id password hashing
//! - [`phone`] - Phone number validation and normalization

pub mod jwt;
pub mod password;
pub mod phone;
