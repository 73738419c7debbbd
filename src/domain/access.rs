//! Role-based access model.
//!
//! Handlers never compare role strings. Each protected operation names the
//! [`Capability`] it needs and the API layer checks it once, before any service
//! call, via [`Role::grants`].

use crate::domain::entities::Role;

/// An action that requires an authenticated caller with a specific grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create, update and delete listings.
    ManageListings,
    /// See draft and archived listings in list and featured queries.
    ViewUnpublishedListings,
    /// Toggle likes and read one's own liked listings.
    LikeListings,
    /// Request pre-signed upload URLs.
    RequestUploadUrl,
    /// List consultation requests.
    ReadConsultations,
    /// Delete consultation requests.
    ManageConsultations,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ManageListings => "manage-listings",
            Capability::ViewUnpublishedListings => "view-unpublished-listings",
            Capability::LikeListings => "like-listings",
            Capability::RequestUploadUrl => "request-upload-url",
            Capability::ReadConsultations => "read-consultations",
            Capability::ManageConsultations => "manage-consultations",
        }
    }
}

impl Role {
    /// Returns true if this role is allowed to perform `capability`.
    pub fn grants(self, capability: Capability) -> bool {
        match self {
            Role::Admin => true,
            Role::User => matches!(
                capability,
                Capability::LikeListings | Capability::RequestUploadUrl
            ),
        }
    }
}

/// Returns true if an optional caller may see unpublished listings.
pub fn sees_unpublished(role: Option<Role>) -> bool {
    role.is_some_and(|r| r.grants(Capability::ViewUnpublishedListings))
}
