//! Listing queries, mutations, likes and landing-page counters.

use std::sync::Arc;

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveTime, SubsecRound, TimeZone, Utc, Weekday,
};
use serde_json::json;
use tracing::info;

use crate::domain::access::sees_unpublished;
use crate::domain::entities::{
    LikeToggle, Listing, ListingPatch, ListingStats, ListingStatus, NewListing, Role,
};
use crate::domain::repositories::{ListingFilter, ListingQuery, ListingRepository, UserRepository};
use crate::error::AppError;

/// At most this many listings are featured at once.
pub const FEATURED_LIMIT: i64 = 3;

/// Start of the week containing `now`, as an instant.
///
/// The week begins at midnight (in `now`'s time zone) of the most recent
/// `first_day`, which is `now`'s own date when it already is that weekday.
pub fn week_start<Tz: TimeZone>(now: DateTime<Tz>, first_day: Weekday) -> DateTime<Utc> {
    let days_back = (7 + now.weekday().num_days_from_monday()
        - first_day.num_days_from_monday())
        % 7;
    let midnight = (now.date_naive() - Duration::days(i64::from(days_back))).and_time(NaiveTime::MIN);

    now.timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// Service for the listing catalogue.
///
/// Visibility rules for the caller's role are applied here before any query
/// reaches the repository.
pub struct ListingService<L: ListingRepository, U: UserRepository> {
    listing_repository: Arc<L>,
    user_repository: Arc<U>,
    preview_public: bool,
    week_starts_on: Weekday,
}

impl<L: ListingRepository, U: UserRepository> ListingService<L, U> {
    /// Creates a new listing service.
    ///
    /// # Arguments
    ///
    /// - `preview_public` - whether anyone may read a non-published listing by id
    /// - `week_starts_on` - first day of the week for [`Self::get_stats`]
    pub fn new(
        listing_repository: Arc<L>,
        user_repository: Arc<U>,
        preview_public: bool,
        week_starts_on: Weekday,
    ) -> Self {
        Self {
            listing_repository,
            user_repository,
            preview_public,
            week_starts_on,
        }
    }

    pub async fn create(&self, new_listing: NewListing) -> Result<Listing, AppError> {
        let listing = self.listing_repository.create(new_listing).await?;
        info!(listing_id = listing.id, status = ?listing.details.status, "Listing created");
        Ok(listing)
    }

    /// Reads a listing and counts the view.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist, or is not
    /// published while previews are private and the caller is not an
    /// administrator.
    pub async fn get_by_id(&self, id: i64, viewer: Option<Role>) -> Result<Listing, AppError> {
        let required_status = if self.preview_public || sees_unpublished(viewer) {
            None
        } else {
            Some(ListingStatus::Published)
        };

        self.listing_repository
            .find_and_record_view(id, required_status)
            .await?
            .ok_or_else(|| AppError::not_found("Listing not found", json!({ "id": id })))
    }

    /// Lists listings matching `filter` as seen by `viewer`.
    pub async fn get_all(
        &self,
        filter: ListingFilter,
        viewer: Option<Role>,
    ) -> Result<Vec<Listing>, AppError> {
        let query = ListingQuery::for_viewer(filter, viewer);
        self.listing_repository.find_all(&query).await
    }

    /// Likes the listing, or removes an existing like.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    pub async fn toggle_like(&self, user_id: i64, listing_id: i64) -> Result<LikeToggle, AppError> {
        self.listing_repository.toggle_like(user_id, listing_id).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    pub async fn update(&self, id: i64, patch: ListingPatch) -> Result<Listing, AppError> {
        self.listing_repository.update(id, patch).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.listing_repository.delete(id).await?;
        info!(listing_id = id, "Listing deleted");
        Ok(())
    }

    /// Up to [`FEATURED_LIMIT`] listings promoted right now, soonest-ending first.
    pub async fn get_featured(&self, viewer: Option<Role>) -> Result<Vec<Listing>, AppError> {
        let status = (!sees_unpublished(viewer)).then_some(ListingStatus::Published);
        // Postgres stores microseconds.
        let now = Utc::now().trunc_subsecs(6);

        let listings = self
            .listing_repository
            .find_featured(now, status, FEATURED_LIMIT)
            .await?;

        debug_assert!(listings.iter().all(|l| l.is_featured_at(now)));
        Ok(listings)
    }

    /// Published totals: all time and since the start of the current week.
    pub async fn get_stats(&self) -> Result<ListingStats, AppError> {
        let since = week_start(Local::now(), self.week_starts_on);

        let (total_count, new_this_week_count) = tokio::try_join!(
            self.listing_repository.count_published(None),
            self.listing_repository.count_published(Some(since)),
        )?;

        Ok(ListingStats {
            total_count,
            new_this_week_count,
        })
    }

    /// Listings the user has liked, most recent like first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user no longer exists.
    pub async fn liked_by(&self, user_id: i64, role: Role) -> Result<Vec<Listing>, AppError> {
        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("User not found", json!({ "id": user_id })));
        }

        let status = (!sees_unpublished(Some(role))).then_some(ListingStatus::Published);
        self.listing_repository.find_liked_by(user_id, status).await
    }
}
