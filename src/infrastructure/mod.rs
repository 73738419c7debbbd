//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces the domain and application layers consume.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`sms`] - Verification code delivery
//! - [`oauth`] - Social login providers
//! - [`storage`] - Pre-signed object upload URLs

pub mod oauth;
pub mod persistence;
pub mod sms;
pub mod storage;
