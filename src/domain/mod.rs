//! Domain layer containing business entities and rules.
//!
//! Nothing here depends on infrastructure or presentation code.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`access`] - Role capabilities and listing visibility
//!
//! Business operations are composed in [`crate::application::services`].

pub mod access;
pub mod entities;
pub mod repositories;
