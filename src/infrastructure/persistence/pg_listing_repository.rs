//! PostgreSQL implementation of the listing repository.
//!
//! Every read returns `liked_by_count`, the live like-edge count, computed in
//! the same statement as the row itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::{
    LikeOutcome, LikeToggle, Listing, ListingPatch, ListingStatus, NewListing,
};
use crate::domain::repositories::{ListingQuery, ListingRepository};
use crate::error::AppError;

const SELECT_LISTING: &str = "SELECT l.*, \
     (SELECT COUNT(*) FROM listing_likes k WHERE k.listing_id = l.id) AS liked_by_count \
     FROM listings l";

/// PostgreSQL repository for listings, like edges and counters.
///
/// Dynamic filters and partial updates are assembled with [`QueryBuilder`];
/// only values are ever bound, column names come from fixed strings.
pub struct PgListingRepository {
    pool: Arc<PgPool>,
}

impl PgListingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn listing_not_found(id: i64) -> AppError {
    AppError::not_found("Listing not found", json!({ "id": id }))
}

/// Appends `column = $n, ` for every field present in the patch.
/// Evaluates to the number of columns set.
macro_rules! push_assignments {
    ($qb:ident, $patch:ident, $($field:ident),+ $(,)?) => {{
        let mut assigned = 0usize;
        $(
            if let Some(value) = $patch.$field {
                $qb.push(concat!(stringify!($field), " = "))
                    .push_bind(value)
                    .push(", ");
                assigned += 1;
            }
        )+
        assigned
    }};
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn create(&self, d: NewListing) -> Result<Listing, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO listings (name, summary, address, description, image_url, gallery_urls, \
             region, category, deposit, monthly_rent, key_money, monthly_revenue, material_cost, \
             personnel_cost, utility_cost, other_cost, delivery_percentage, net_profit, \
             is_automated, has_parking, is_first_floor, is_near_station, status, is_best, \
             is_weekly_best, featured_start, featured_end) VALUES (",
        );

        let mut values = qb.separated(", ");
        values
            .push_bind(d.name)
            .push_bind(d.summary)
            .push_bind(d.address)
            .push_bind(d.description)
            .push_bind(d.image_url)
            .push_bind(d.gallery_urls)
            .push_bind(d.region)
            .push_bind(d.category)
            .push_bind(d.deposit)
            .push_bind(d.monthly_rent)
            .push_bind(d.key_money)
            .push_bind(d.monthly_revenue)
            .push_bind(d.material_cost)
            .push_bind(d.personnel_cost)
            .push_bind(d.utility_cost)
            .push_bind(d.other_cost)
            .push_bind(d.delivery_percentage)
            .push_bind(d.net_profit)
            .push_bind(d.is_automated)
            .push_bind(d.has_parking)
            .push_bind(d.is_first_floor)
            .push_bind(d.is_near_station)
            .push_bind(d.status)
            .push_bind(d.is_best)
            .push_bind(d.is_weekly_best)
            .push_bind(d.featured_start)
            .push_bind(d.featured_end);
        values.push_unseparated(") RETURNING *, 0::BIGINT AS liked_by_count");

        let listing = qb
            .build_query_as::<Listing>()
            .fetch_one(self.pool.as_ref())
            .await?;

        debug!(listing_id = listing.id, "Listing created");
        Ok(listing)
    }

    async fn find_and_record_view(
        &self,
        id: i64,
        required_status: Option<ListingStatus>,
    ) -> Result<Option<Listing>, AppError> {
        let listing = sqlx::query_as::<_, Listing>(
            r#"
            WITH viewed AS (
                UPDATE listings
                SET view_count = view_count + 1
                WHERE id = $1 AND ($2::listing_status IS NULL OR status = $2)
                RETURNING *
            )
            SELECT v.*,
                   (SELECT COUNT(*) FROM listing_likes k WHERE k.listing_id = v.id) AS liked_by_count
            FROM viewed v
            "#,
        )
        .bind(id)
        .bind(required_status)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(listing)
    }

    async fn find_all(&self, query: &ListingQuery) -> Result<Vec<Listing>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_LISTING);
        qb.push(" WHERE TRUE");

        if let Some(status) = query.status {
            qb.push(" AND l.status = ").push_bind(status);
        }
        if let Some(region) = query.region {
            qb.push(" AND l.region = ").push_bind(region);
        }
        if let Some(category) = query.category {
            qb.push(" AND l.category = ").push_bind(category);
        }
        if let Some(max) = query.key_money_lte {
            qb.push(" AND l.key_money <= ").push_bind(max);
        }

        qb.push(" ORDER BY ");
        if query.promoted_first {
            qb.push("l.is_weekly_best DESC, ");
        }
        let direction = query.order.keyword();
        qb.push(format!(
            "l.{} {direction}, l.id {direction}",
            query.sort_by.column()
        ));

        let listings = qb
            .build_query_as::<Listing>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(listings)
    }

    async fn toggle_like(&self, user_id: i64, listing_id: i64) -> Result<LikeToggle, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serialises every toggle on this listing until commit.
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM listings WHERE id = $1 FOR UPDATE")
            .bind(listing_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(listing_not_found(listing_id));
        }

        let removed = sqlx::query("DELETE FROM listing_likes WHERE user_id = $1 AND listing_id = $2")
            .bind(user_id)
            .bind(listing_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let (outcome, delta) = if removed > 0 {
            (LikeOutcome::Unliked, -1i64)
        } else {
            sqlx::query("INSERT INTO listing_likes (user_id, listing_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(listing_id)
                .execute(&mut *tx)
                .await?;
            (LikeOutcome::Liked, 1i64)
        };

        let like_count = sqlx::query_scalar::<_, i64>(
            "UPDATE listings SET like_count = like_count + $2 WHERE id = $1 RETURNING like_count",
        )
        .bind(listing_id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(user_id, listing_id, ?outcome, like_count, "Like toggled");
        Ok(LikeToggle {
            outcome,
            like_count,
        })
    }

    async fn update(&self, id: i64, patch: ListingPatch) -> Result<Listing, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE listings SET ");

        let assigned = push_assignments!(
            qb,
            patch,
            name,
            summary,
            address,
            description,
            image_url,
            gallery_urls,
            region,
            category,
            deposit,
            monthly_rent,
            key_money,
            monthly_revenue,
            material_cost,
            personnel_cost,
            utility_cost,
            other_cost,
            delivery_percentage,
            net_profit,
            is_automated,
            has_parking,
            is_first_floor,
            is_near_station,
            status,
            is_best,
            is_weekly_best,
            featured_start,
            featured_end,
        );

        let listing = if assigned == 0 {
            sqlx::query_as::<_, Listing>(&format!("{SELECT_LISTING} WHERE l.id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?
        } else {
            qb.push("updated_at = NOW() WHERE id = ")
                .push_bind(id)
                .push(
                    " RETURNING *, (SELECT COUNT(*) FROM listing_likes k \
                     WHERE k.listing_id = listings.id) AS liked_by_count",
                );

            qb.build_query_as::<Listing>()
                .fetch_optional(self.pool.as_ref())
                .await?
        };

        listing.ok_or_else(|| listing_not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(listing_not_found(id));
        }

        Ok(())
    }

    async fn find_featured(
        &self,
        now: DateTime<Utc>,
        status: Option<ListingStatus>,
        limit: i64,
    ) -> Result<Vec<Listing>, AppError> {
        let listings = sqlx::query_as::<_, Listing>(&format!(
            "{SELECT_LISTING} \
             WHERE l.is_weekly_best \
               AND l.featured_start <= $1 AND l.featured_end >= $1 \
               AND ($2::listing_status IS NULL OR l.status = $2) \
             ORDER BY l.featured_end ASC, l.id ASC \
             LIMIT $3"
        ))
        .bind(now)
        .bind(status)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(listings)
    }

    async fn count_published(&self, since: Option<DateTime<Utc>>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM listings
            WHERE status = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
            "#,
        )
        .bind(ListingStatus::Published)
        .bind(since)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn find_liked_by(
        &self,
        user_id: i64,
        status: Option<ListingStatus>,
    ) -> Result<Vec<Listing>, AppError> {
        let listings = sqlx::query_as::<_, Listing>(
            r#"
            SELECT l.*,
                   (SELECT COUNT(*) FROM listing_likes k WHERE k.listing_id = l.id) AS liked_by_count
            FROM listing_likes mine
            JOIN listings l ON l.id = mine.listing_id
            WHERE mine.user_id = $1 AND ($2::listing_status IS NULL OR l.status = $2)
            ORDER BY mine.created_at DESC, l.id DESC
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(listings)
    }
}
