mod common;

use serde_json::Value;
use sqlx::PgPool;

#[sqlx::test]
async fn test_presigned_url_for_authenticated_user(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let (_id, token) = common::user_token(&pool, "u@example.com").await;

    let response = server
        .get("/uploads/presigned-url")
        .add_query_param("filename", "../cover photo.png")
        .add_query_param("filetype", "image/png")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let key = body["key"].as_str().unwrap();
    assert!(key.starts_with("uploads/"));
    assert!(key.ends_with("-cover_photo.png"));
    assert!(!key.contains(".."));
    assert_eq!(
        body["publicUrl"],
        format!("https://bucket.example.com/{key}")
    );
    assert!(
        body["uploadUrl"]
            .as_str()
            .unwrap()
            .contains("X-Amz-Signature")
    );
}

#[sqlx::test]
async fn test_presigned_url_requires_authentication(pool: PgPool) {
    let (server, _sms) = common::make_server(pool);

    server
        .get("/uploads/presigned-url")
        .add_query_param("filename", "cover.png")
        .add_query_param("filetype", "image/png")
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_presigned_url_validation(pool: PgPool) {
    let (server, _sms) = common::make_server(pool.clone());
    let (_id, token) = common::user_token(&pool, "u@example.com").await;

    server
        .get("/uploads/presigned-url")
        .add_query_param("filename", "cover.png")
        .add_query_param("filetype", "not a mime")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();

    server
        .get("/uploads/presigned-url")
        .add_query_param("filetype", "image/png")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();
}
