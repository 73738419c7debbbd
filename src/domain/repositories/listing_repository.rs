//! Repository trait and query model for listings.

use crate::domain::access::sees_unpublished;
use crate::domain::entities::{
    Category, LikeToggle, Listing, ListingPatch, ListingStatus, NewListing, Region, Role,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Column a listing query is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    KeyMoney,
    Deposit,
    MonthlyRent,
    MonthlyRevenue,
    NetProfit,
    ViewCount,
    LikeCount,
}

impl SortField {
    /// SQL column for this field. Only these fixed names ever reach a query.
    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::KeyMoney => "key_money",
            SortField::Deposit => "deposit",
            SortField::MonthlyRent => "monthly_rent",
            SortField::MonthlyRevenue => "monthly_revenue",
            SortField::NetProfit => "net_profit",
            SortField::ViewCount => "view_count",
            SortField::LikeCount => "like_count",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filters as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub status: Option<ListingStatus>,
    pub region: Option<Region>,
    pub category: Option<Category>,
    pub key_money_lte: Option<i64>,
    pub sort_by: SortField,
    pub order: SortOrder,
}

/// The query actually executed, after visibility rules are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub status: Option<ListingStatus>,
    pub region: Option<Region>,
    pub category: Option<Category>,
    pub key_money_lte: Option<i64>,
    pub sort_by: SortField,
    pub order: SortOrder,
    /// Sort weekly-best listings first, before `sort_by`.
    pub promoted_first: bool,
}

impl ListingQuery {
    /// Applies the role rules to a caller filter.
    ///
    /// Callers who cannot see unpublished listings are pinned to
    /// [`ListingStatus::Published`] whatever status they asked for. Callers who
    /// can get their status filter as given (or none), and see weekly-best
    /// listings first.
    pub fn for_viewer(filter: ListingFilter, viewer: Option<Role>) -> Self {
        let privileged = sees_unpublished(viewer);

        let status = if privileged {
            filter.status
        } else {
            Some(ListingStatus::Published)
        };

        Self {
            status,
            region: filter.region,
            category: filter.category,
            key_money_lte: filter.key_money_lte,
            sort_by: filter.sort_by,
            order: filter.order,
            promoted_first: privileged,
        }
    }
}

/// Repository interface for listings, likes and listing counters.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgListingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_listing.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persists a new listing with zeroed counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a column constraint rejects a value.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_listing: NewListing) -> Result<Listing, AppError>;

    /// Increments the view counter and returns the updated listing.
    ///
    /// Increment and read are one statement. When `required_status` is set, a
    /// listing in another status is treated as absent and not counted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_and_record_view(
        &self,
        id: i64,
        required_status: Option<ListingStatus>,
    ) -> Result<Option<Listing>, AppError>;

    /// Returns every listing matching the query, in query order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_all(&self, query: &ListingQuery) -> Result<Vec<Listing>, AppError>;

    /// Toggles the like edge between a user and a listing.
    ///
    /// The edge and `like_count` change in one transaction holding the listing
    /// row lock.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing or the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn toggle_like(&self, user_id: i64, listing_id: i64) -> Result<LikeToggle, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    /// Returns [`AppError::Validation`] if a column constraint rejects a value.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: ListingPatch) -> Result<Listing, AppError>;

    /// Hard-deletes a listing and its like edges.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Returns up to `limit` weekly-best listings whose window contains `now`,
    /// soonest-ending first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_featured(
        &self,
        now: DateTime<Utc>,
        status: Option<ListingStatus>,
        limit: i64,
    ) -> Result<Vec<Listing>, AppError>;

    /// Counts published listings, optionally only those created at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_published(&self, since: Option<DateTime<Utc>>) -> Result<i64, AppError>;

    /// Returns the listings a user has liked, most recent like first,
    /// optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_liked_by(
        &self,
        user_id: i64,
        status: Option<ListingStatus>,
    ) -> Result<Vec<Listing>, AppError>;
}
