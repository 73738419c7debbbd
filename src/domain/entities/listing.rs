//! Listing entity: a leasable business property.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the property is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "listing_region", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    Metropolitan,
    NonMetropolitan,
}

/// Kind of business operated on the premises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "listing_category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    CafeBakery,
    RestaurantBar,
    RetailOther,
}

/// Publication state. Only `Published` listings are visible to non-administrators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "listing_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Every caller-supplied listing field.
///
/// This is exactly what `create` persists and what a read returns besides the
/// server-assigned id, counters and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetails {
    pub name: String,
    pub summary: String,
    pub address: String,
    pub description: String,
    pub image_url: String,
    pub gallery_urls: Vec<String>,
    pub region: Region,
    pub category: Category,
    pub deposit: i64,
    pub monthly_rent: i64,
    pub key_money: i64,
    pub monthly_revenue: i64,
    pub material_cost: i64,
    pub personnel_cost: i64,
    pub utility_cost: Option<i64>,
    pub other_cost: Option<i64>,
    pub delivery_percentage: Option<i32>,
    pub net_profit: i64,
    pub is_automated: bool,
    pub has_parking: bool,
    pub is_first_floor: bool,
    pub is_near_station: bool,
    pub status: ListingStatus,
    pub is_best: bool,
    pub is_weekly_best: bool,
    pub featured_start: Option<DateTime<Utc>>,
    pub featured_end: Option<DateTime<Utc>>,
}

/// A persisted listing.
///
/// # Counters
///
/// `view_count` is incremented atomically with each detail read.
/// `like_count` is a cache of the like-edge cardinality: every like/unlike
/// changes the edge and the counter in one transaction, so at every commit
/// `like_count == liked_by_count`. `liked_by_count` is the live `COUNT(*)` over
/// the edges, computed in the same statement that reads the row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    #[sqlx(flatten)]
    pub details: ListingDetails,
    pub view_count: i64,
    pub like_count: i64,
    pub liked_by_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Returns true if the listing is promoted at `now`.
    ///
    /// Both window bounds are inclusive; a missing bound never matches.
    pub fn is_featured_at(&self, now: DateTime<Utc>) -> bool {
        let d = &self.details;
        d.is_weekly_best
            && d.featured_start.is_some_and(|start| start <= now)
            && d.featured_end.is_some_and(|end| now <= end)
    }
}

/// Input data for creating a new listing.
pub type NewListing = ListingDetails;

/// Partial update for an existing listing.
///
/// `None` fields are left unchanged. For nullable columns `Some(None)` clears
/// the value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default)]
pub struct ListingPatch {
    pub name: Option<String>,
    pub summary: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub gallery_urls: Option<Vec<String>>,
    pub region: Option<Region>,
    pub category: Option<Category>,
    pub deposit: Option<i64>,
    pub monthly_rent: Option<i64>,
    pub key_money: Option<i64>,
    pub monthly_revenue: Option<i64>,
    pub material_cost: Option<i64>,
    pub personnel_cost: Option<i64>,
    pub utility_cost: Option<Option<i64>>,
    pub other_cost: Option<Option<i64>>,
    pub delivery_percentage: Option<Option<i32>>,
    pub net_profit: Option<i64>,
    pub is_automated: Option<bool>,
    pub has_parking: Option<bool>,
    pub is_first_floor: Option<bool>,
    pub is_near_station: Option<bool>,
    pub status: Option<ListingStatus>,
    pub is_best: Option<bool>,
    pub is_weekly_best: Option<bool>,
    pub featured_start: Option<Option<DateTime<Utc>>>,
    pub featured_end: Option<Option<DateTime<Utc>>>,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeOutcome {
    Liked,
    Unliked,
}

/// Outcome of a like toggle together with the listing's resulting counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    pub outcome: LikeOutcome,
    pub like_count: i64,
}

/// Published-listing counters for the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingStats {
    pub total_count: i64,
    pub new_this_week_count: i64,
}
