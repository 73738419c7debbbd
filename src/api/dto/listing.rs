//! DTOs for listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::{
    Category, LikeOutcome, LikeToggle, Listing, ListingDetails, ListingPatch, ListingStats,
    ListingStatus, NewListing, Region,
};
use crate::domain::repositories::{ListingFilter, SortField, SortOrder};

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

fn validate_gallery_urls(urls: &[String]) -> Result<(), ValidationError> {
    if urls.len() > 20 {
        return Err(ValidationError::new("gallery_size")
            .with_message("At most 20 gallery images are allowed".into()));
    }
    if urls.iter().all(|url| is_http_url(url)) {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("Gallery entries must be http(s) URLs".into()))
    }
}

fn check_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(ValidationError::new("featured_window")
            .with_message("featuredStart must not be after featuredEnd".into())),
        _ => Ok(()),
    }
}

fn validate_create_window(request: &CreateListingRequest) -> Result<(), ValidationError> {
    check_window(request.featured_start, request.featured_end)
}

/// Checks the nullable fields of a patch, which the derive cannot reach.
fn validate_patch(request: &UpdateListingRequest) -> Result<(), ValidationError> {
    let negative = |value: &Option<Option<i64>>| matches!(value, Some(Some(v)) if *v < 0);
    if negative(&request.utility_cost) || negative(&request.other_cost) {
        return Err(ValidationError::new("range").with_message("Costs must be non-negative".into()));
    }

    if let Some(Some(percentage)) = request.delivery_percentage {
        if !(0..=100).contains(&percentage) {
            return Err(ValidationError::new("range")
                .with_message("deliveryPercentage must be between 0 and 100".into()));
        }
    }

    if let Some(urls) = &request.gallery_urls {
        validate_gallery_urls(urls)?;
    }

    check_window(request.featured_start.flatten(), request.featured_end.flatten())
}

/// Request body for `POST /listings`.
///
/// `status` defaults to `DRAFT`; flags default to `false`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_window"))]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 300))]
    pub summary: String,
    #[validate(length(min = 1, max = 300))]
    pub address: String,
    #[validate(length(min = 1, max = 10000))]
    pub description: String,
    #[validate(url(message = "Invalid URL format"))]
    pub image_url: String,
    #[serde(default)]
    #[validate(custom(function = "validate_gallery_urls"))]
    pub gallery_urls: Vec<String>,

    pub region: Region,
    pub category: Category,

    #[validate(range(min = 0))]
    pub deposit: i64,
    #[validate(range(min = 0))]
    pub monthly_rent: i64,
    #[validate(range(min = 0))]
    pub key_money: i64,
    #[validate(range(min = 0))]
    pub monthly_revenue: i64,
    #[validate(range(min = 0))]
    pub material_cost: i64,
    #[validate(range(min = 0))]
    pub personnel_cost: i64,
    #[validate(range(min = 0))]
    pub utility_cost: Option<i64>,
    #[validate(range(min = 0))]
    pub other_cost: Option<i64>,
    #[validate(range(min = 0, max = 100))]
    pub delivery_percentage: Option<i32>,
    #[validate(range(min = 0))]
    pub net_profit: i64,

    #[serde(default)]
    pub is_automated: bool,
    #[serde(default)]
    pub has_parking: bool,
    #[serde(default)]
    pub is_first_floor: bool,
    #[serde(default)]
    pub is_near_station: bool,

    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub is_best: bool,
    #[serde(default)]
    pub is_weekly_best: bool,
    pub featured_start: Option<DateTime<Utc>>,
    pub featured_end: Option<DateTime<Utc>>,
}

impl From<CreateListingRequest> for NewListing {
    fn from(r: CreateListingRequest) -> Self {
        ListingDetails {
            name: r.name,
            summary: r.summary,
            address: r.address,
            description: r.description,
            image_url: r.image_url,
            gallery_urls: r.gallery_urls,
            region: r.region,
            category: r.category,
            deposit: r.deposit,
            monthly_rent: r.monthly_rent,
            key_money: r.key_money,
            monthly_revenue: r.monthly_revenue,
            material_cost: r.material_cost,
            personnel_cost: r.personnel_cost,
            utility_cost: r.utility_cost,
            other_cost: r.other_cost,
            delivery_percentage: r.delivery_percentage,
            net_profit: r.net_profit,
            is_automated: r.is_automated,
            has_parking: r.has_parking,
            is_first_floor: r.is_first_floor,
            is_near_station: r.is_near_station,
            status: r.status,
            is_best: r.is_best,
            is_weekly_best: r.is_weekly_best,
            featured_start: r.featured_start,
            featured_end: r.featured_end,
        }
    }
}

/// Request body for `PATCH /listings/{id}`.
///
/// Absent fields are left unchanged. For `utilityCost`, `otherCost`,
/// `deliveryPercentage`, `featuredStart` and `featuredEnd`, an explicit
/// `null` clears the value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_patch"))]
pub struct UpdateListingRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub summary: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub description: Option<String>,
    #[validate(url(message = "Invalid URL format"))]
    pub image_url: Option<String>,
    pub gallery_urls: Option<Vec<String>>,

    pub region: Option<Region>,
    pub category: Option<Category>,

    #[validate(range(min = 0))]
    pub deposit: Option<i64>,
    #[validate(range(min = 0))]
    pub monthly_rent: Option<i64>,
    #[validate(range(min = 0))]
    pub key_money: Option<i64>,
    #[validate(range(min = 0))]
    pub monthly_revenue: Option<i64>,
    #[validate(range(min = 0))]
    pub material_cost: Option<i64>,
    #[validate(range(min = 0))]
    pub personnel_cost: Option<i64>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub utility_cost: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub other_cost: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub delivery_percentage: Option<Option<i32>>,
    #[validate(range(min = 0))]
    pub net_profit: Option<i64>,

    pub is_automated: Option<bool>,
    pub has_parking: Option<bool>,
    pub is_first_floor: Option<bool>,
    pub is_near_station: Option<bool>,

    pub status: Option<ListingStatus>,
    pub is_best: Option<bool>,
    pub is_weekly_best: Option<bool>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub featured_start: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub featured_end: Option<Option<DateTime<Utc>>>,
}

impl From<UpdateListingRequest> for ListingPatch {
    fn from(r: UpdateListingRequest) -> Self {
        ListingPatch {
            name: r.name,
            summary: r.summary,
            address: r.address,
            description: r.description,
            image_url: r.image_url,
            gallery_urls: r.gallery_urls,
            region: r.region,
            category: r.category,
            deposit: r.deposit,
            monthly_rent: r.monthly_rent,
            key_money: r.key_money,
            monthly_revenue: r.monthly_revenue,
            material_cost: r.material_cost,
            personnel_cost: r.personnel_cost,
            utility_cost: r.utility_cost,
            other_cost: r.other_cost,
            delivery_percentage: r.delivery_percentage,
            net_profit: r.net_profit,
            is_automated: r.is_automated,
            has_parking: r.has_parking,
            is_first_floor: r.is_first_floor,
            is_near_station: r.is_near_station,
            status: r.status,
            is_best: r.is_best,
            is_weekly_best: r.is_weekly_best,
            featured_start: r.featured_start,
            featured_end: r.featured_end,
        }
    }
}

/// Query for `GET /listings`.
///
/// `status` is honoured for administrators only.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListingsQuery {
    pub region: Option<Region>,
    pub category: Option<Category>,
    #[validate(range(min = 0))]
    pub key_money_lte: Option<i64>,
    pub sort_by: Option<SortField>,
    pub order: Option<SortOrder>,
    pub status: Option<ListingStatus>,
}

impl From<ListingsQuery> for ListingFilter {
    fn from(q: ListingsQuery) -> Self {
        ListingFilter {
            status: q.status,
            region: q.region,
            category: q.category,
            key_money_lte: q.key_money_lte,
            sort_by: q.sort_by.unwrap_or_default(),
            order: q.order.unwrap_or_default(),
        }
    }
}

/// A listing as returned by every listing endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: i64,
    #[serde(flatten)]
    pub details: ListingDetails,
    pub view_count: i64,
    pub like_count: i64,
    /// Live count of like edges.
    pub liked_by_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            details: listing.details,
            view_count: listing.view_count,
            like_count: listing.like_count,
            liked_by_count: listing.liked_by_count,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

/// Response of `POST /listings/{id}/like`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub status: LikeOutcome,
    pub message: String,
    pub like_count: i64,
}

impl From<LikeToggle> for LikeResponse {
    fn from(toggle: LikeToggle) -> Self {
        let message = match toggle.outcome {
            LikeOutcome::Liked => "Listing liked",
            LikeOutcome::Unliked => "Like removed",
        };

        Self {
            status: toggle.outcome,
            message: message.to_string(),
            like_count: toggle.like_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_count: i64,
    pub new_this_week_count: i64,
}

impl From<ListingStats> for StatsResponse {
    fn from(stats: ListingStats) -> Self {
        Self {
            total_count: stats.total_count,
            new_this_week_count: stats.new_this_week_count,
        }
    }
}
