mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use lease_market::domain::entities::{ListingStatus, Role};
use serde_json::{Value, json};
use sqlx::PgPool;

fn create_body(name: &str) -> Value {
    json!({
        "name": name,
        "summary": "Busy street corner",
        "address": "12 Station Rd",
        "description": "Fully equipped kitchen",
        "imageUrl": "https://cdn.example.com/cover.jpg",
        "galleryUrls": ["https://cdn.example.com/1.jpg"],
        "region": "METROPOLITAN",
        "category": "CAFE_BAKERY",
        "deposit": 3000,
        "monthlyRent": 200,
        "keyMoney": 5000,
        "monthlyRevenue": 4000,
        "materialCost": 1200,
        "personnelCost": 900,
        "utilityCost": 100,
        "netProfit": 1600,
        "status": "PUBLISHED"
    })
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_i64().unwrap())
        .collect()
}

#[sqlx::test]
async fn test_create_listing_as_admin(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let token = common::admin_token(&pool).await;

    let response = server
        .post("/listings")
        .authorization_bearer(&token)
        .json(&create_body("Corner bakery"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["name"], "Corner bakery");
    assert_eq!(body["status"], "PUBLISHED");
    assert_eq!(body["keyMoney"], 5000);
    assert_eq!(body["utilityCost"], 100);
    assert!(body["otherCost"].is_null());
    assert_eq!(body["isAutomated"], false);
    assert_eq!(body["viewCount"], 0);
    assert_eq!(body["likeCount"], 0);
    assert!(body["id"].as_i64().is_some());
}

#[sqlx::test]
async fn test_create_listing_defaults_to_draft(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let token = common::admin_token(&pool).await;

    let mut body = create_body("Draft by default");
    body.as_object_mut().unwrap().remove("status");

    let response = server
        .post("/listings")
        .authorization_bearer(&token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["status"], "DRAFT");
}

#[sqlx::test]
async fn test_create_listing_permissions(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let (_id, user_token) = common::user_token(&pool, "u@example.com").await;

    server
        .post("/listings")
        .json(&create_body("Anonymous"))
        .await
        .assert_status_unauthorized();

    let forbidden = server
        .post("/listings")
        .authorization_bearer(&user_token)
        .json(&create_body("User"))
        .await;
    forbidden.assert_status_forbidden();
    assert_eq!(forbidden.json::<Value>()["error"]["code"], "forbidden");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM listings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_create_listing_validation(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let token = common::admin_token(&pool).await;

    let mut body = create_body("");
    body["keyMoney"] = json!(-1);
    body["deliveryPercentage"] = json!(150);
    body["galleryUrls"] = json!(["ftp://example.com/x.jpg"]);

    let response = server
        .post("/listings")
        .authorization_bearer(&token)
        .json(&body)
        .await;

    response.assert_status_bad_request();
    let fields = &response.json::<Value>()["error"]["details"]["fields"];
    assert!(fields.get("name").is_some());
    assert!(fields.get("keyMoney").is_some() || fields.get("key_money").is_some());
}

#[sqlx::test]
async fn test_create_listing_rejects_inverted_window(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let token = common::admin_token(&pool).await;
    let now = Utc::now();

    let mut body = create_body("Window");
    body["featuredStart"] = json!(now);
    body["featuredEnd"] = json!(now - Duration::days(1));

    server
        .post("/listings")
        .authorization_bearer(&token)
        .json(&body)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_drafts_hidden_from_non_admins(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let published = common::create_published(&pool, "Published", 5000).await;
    let draft = common::create_listing(
        &pool,
        common::listing_details("Draft", ListingStatus::Draft, 5000),
    )
    .await;
    let (_id, user_token) = common::user_token(&pool, "u@example.com").await;
    let admin_token = common::admin_token(&pool).await;

    let anonymous: Value = server.get("/listings").await.json();
    assert_eq!(ids(&anonymous), vec![published]);

    let asked_for_drafts: Value = server
        .get("/listings")
        .add_query_param("status", "DRAFT")
        .authorization_bearer(&user_token)
        .await
        .json();
    assert_eq!(ids(&asked_for_drafts), vec![published]);

    let admin: Value = server
        .get("/listings")
        .add_query_param("status", "DRAFT")
        .authorization_bearer(&admin_token)
        .await
        .json();
    assert_eq!(ids(&admin), vec![draft]);
}

#[sqlx::test]
async fn test_invalid_token_on_public_route_is_anonymous(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let published = common::create_published(&pool, "Published", 5000).await;
    common::create_listing(
        &pool,
        common::listing_details("Draft", ListingStatus::Draft, 5000),
    )
    .await;

    let response = server
        .get("/listings")
        .authorization_bearer("not-a-jwt")
        .await;

    response.assert_status_ok();
    assert_eq!(ids(&response.json()), vec![published]);
}

#[sqlx::test]
async fn test_filter_by_key_money_and_sort(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let a = common::create_published(&pool, "A", 5000).await;
    common::create_published(&pool, "B", 8000).await;
    let c = common::create_published(&pool, "C", 6000).await;

    let response = server
        .get("/listings")
        .add_query_param("keyMoneyLte", 6000)
        .add_query_param("sortBy", "keyMoney")
        .add_query_param("order", "asc")
        .await;

    response.assert_status_ok();
    assert_eq!(ids(&response.json()), vec![a, c]);
}

#[sqlx::test]
async fn test_filter_by_region_and_category(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let cafe = common::create_published(&pool, "Cafe", 100).await;
    let mut bar = common::listing_details("Bar", ListingStatus::Published, 100);
    bar.category = lease_market::domain::entities::Category::RestaurantBar;
    bar.region = lease_market::domain::entities::Region::NonMetropolitan;
    let bar = common::create_listing(&pool, bar).await;

    let bars: Value = server
        .get("/listings")
        .add_query_param("category", "RESTAURANT_BAR")
        .await
        .json();
    assert_eq!(ids(&bars), vec![bar]);

    let metro: Value = server
        .get("/listings")
        .add_query_param("region", "METROPOLITAN")
        .await
        .json();
    assert_eq!(ids(&metro), vec![cafe]);
}

#[sqlx::test]
async fn test_unknown_sort_field_is_rejected(pool: PgPool) {
    let (server, _sms) = common::make_server(pool);

    server
        .get("/listings")
        .add_query_param("sortBy", "password")
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_get_listing_counts_views(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let id = common::create_published(&pool, "Viewed", 100).await;

    let first: Value = server.get(&format!("/listings/{id}")).await.json();
    assert_eq!(first["viewCount"], 1);
    assert_eq!(first["name"], "Viewed");

    let second: Value = server.get(&format!("/listings/{id}")).await.json();
    assert_eq!(second["viewCount"], 2);

    server.get("/listings/999999").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_private_preview_hides_drafts(pool: PgPool) {
    let server = common::make_private_preview_server(pool.clone());
    let draft = common::create_listing(
        &pool,
        common::listing_details("Draft", ListingStatus::Draft, 100),
    )
    .await;
    let (_id, user_token) = common::user_token(&pool, "u@example.com").await;
    let admin_token = common::admin_token(&pool).await;

    server
        .get(&format!("/listings/{draft}"))
        .await
        .assert_status_not_found();
    server
        .get(&format!("/listings/{draft}"))
        .authorization_bearer(&user_token)
        .await
        .assert_status_not_found();

    let admin = server
        .get(&format!("/listings/{draft}"))
        .authorization_bearer(&admin_token)
        .await;
    admin.assert_status_ok();
    // Rejected reads were not counted.
    assert_eq!(admin.json::<Value>()["viewCount"], 1);
}

#[sqlx::test]
async fn test_like_and_unlike(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let id = common::create_published(&pool, "Liked", 100).await;
    let (_user, token) = common::user_token(&pool, "u@example.com").await;

    let liked = server
        .post(&format!("/listings/{id}/like"))
        .authorization_bearer(&token)
        .await;
    liked.assert_status_ok();
    let body: Value = liked.json();
    assert_eq!(body["status"], "liked");
    assert_eq!(body["message"], "Listing liked");
    assert_eq!(body["likeCount"], 1);

    let unliked: Value = server
        .post(&format!("/listings/{id}/like"))
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(unliked["status"], "unliked");
    assert_eq!(unliked["message"], "Like removed");
    assert_eq!(unliked["likeCount"], 0);
}

#[sqlx::test]
async fn test_like_requires_authentication(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let id = common::create_published(&pool, "Liked", 100).await;

    server
        .post(&format!("/listings/{id}/like"))
        .await
        .assert_status_unauthorized();

    let (_user, token) = common::user_token(&pool, "u@example.com").await;
    server
        .post("/listings/999999/like")
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_update_listing(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let admin_token = common::admin_token(&pool).await;
    let mut details = common::listing_details("Before", ListingStatus::Draft, 100);
    details.utility_cost = Some(70);
    let id = common::create_listing(&pool, details).await;

    let response = server
        .patch(&format!("/listings/{id}"))
        .authorization_bearer(&admin_token)
        .json(&json!({ "name": "After", "status": "PUBLISHED", "utilityCost": null }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "After");
    assert_eq!(body["status"], "PUBLISHED");
    assert!(body["utilityCost"].is_null());
    assert_eq!(body["keyMoney"], 100);

    // The listing is now visible to everyone.
    let public: Value = server.get("/listings").await.json();
    assert_eq!(ids(&public), vec![id]);
}

#[sqlx::test]
async fn test_update_listing_errors(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let admin_token = common::admin_token(&pool).await;
    let (_user, user_token) = common::user_token(&pool, "u@example.com").await;
    let id = common::create_published(&pool, "Listing", 100).await;

    server
        .patch(&format!("/listings/{id}"))
        .authorization_bearer(&user_token)
        .json(&json!({ "name": "Hijacked" }))
        .await
        .assert_status_forbidden();

    server
        .patch(&format!("/listings/{id}"))
        .authorization_bearer(&admin_token)
        .json(&json!({ "deliveryPercentage": 101 }))
        .await
        .assert_status_bad_request();

    server
        .patch("/listings/999999")
        .authorization_bearer(&admin_token)
        .json(&json!({ "name": "Ghost" }))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_delete_listing(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let admin_token = common::admin_token(&pool).await;
    let (_user, user_token) = common::user_token(&pool, "u@example.com").await;
    let id = common::create_published(&pool, "Doomed", 100).await;

    server
        .post(&format!("/listings/{id}/like"))
        .authorization_bearer(&user_token)
        .await
        .assert_status_ok();

    server
        .delete(&format!("/listings/{id}"))
        .authorization_bearer(&user_token)
        .await
        .assert_status_forbidden();

    let response = server
        .delete(&format!("/listings/{id}"))
        .authorization_bearer(&admin_token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Listing deleted");

    server
        .get(&format!("/listings/{id}"))
        .await
        .assert_status_not_found();
    server
        .delete(&format!("/listings/{id}"))
        .authorization_bearer(&admin_token)
        .await
        .assert_status_not_found();

    let likes: Value = server
        .get("/users/me/likes")
        .authorization_bearer(&user_token)
        .await
        .json();
    assert!(likes.as_array().unwrap().is_empty());
}

#[sqlx::test]
async fn test_featured_listings(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let now = Utc::now();

    let mut featured = common::listing_details("Featured", ListingStatus::Published, 100);
    featured.is_weekly_best = true;
    featured.featured_start = Some(now - Duration::days(1));
    featured.featured_end = Some(now + Duration::days(1));
    let featured = common::create_listing(&pool, featured).await;

    let mut ended = common::listing_details("Ended", ListingStatus::Published, 100);
    ended.is_weekly_best = true;
    ended.featured_start = Some(now - Duration::days(3));
    ended.featured_end = Some(now - Duration::days(2));
    common::create_listing(&pool, ended).await;

    common::create_published(&pool, "Plain", 100).await;

    let response = server.get("/listings/featured").await;
    response.assert_status_ok();
    assert_eq!(ids(&response.json()), vec![featured]);
}

#[sqlx::test]
async fn test_stats(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    common::create_published(&pool, "Old", 100).await;
    common::create_published(&pool, "New", 100).await;
    common::create_listing(
        &pool,
        common::listing_details("Draft", ListingStatus::Draft, 100),
    )
    .await;
    sqlx::query("UPDATE listings SET created_at = NOW() - INTERVAL '30 days' WHERE name = 'Old'")
        .execute(&pool)
        .await
        .unwrap();

    let response = server.get("/listings/stats").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["totalCount"], 2);
    assert_eq!(body["newThisWeekCount"], 1);
}

#[sqlx::test]
async fn test_my_likes(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let (_user, token) = common::user_token(&pool, "u@example.com").await;
    let first = common::create_published(&pool, "First", 100).await;
    let second = common::create_published(&pool, "Second", 100).await;
    let archived = common::create_published(&pool, "Later archived", 100).await;

    for id in [first, second, archived] {
        server
            .post(&format!("/listings/{id}/like"))
            .authorization_bearer(&token)
            .await
            .assert_status_ok();
    }
    sqlx::query("UPDATE listings SET status = 'ARCHIVED' WHERE id = $1")
        .bind(archived)
        .execute(&pool)
        .await
        .unwrap();

    let response = server
        .get("/users/me/likes")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let liked = ids(&response.json());
    assert_eq!(liked.len(), 2);
    assert!(liked.contains(&first));
    assert!(liked.contains(&second));

    server.get("/users/me/likes").await.assert_status_unauthorized();
}

#[sqlx::test]
async fn test_my_likes_for_deleted_account(pool: PgPool) {
    let (server, _sms) = common::make_server(pool);

    server
        .get("/users/me/likes")
        .authorization_bearer(common::token_for(4242, Role::User))
        .await
        .assert_status_not_found();
}
