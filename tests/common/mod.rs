#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use lease_market::api::handlers::health_handler;
use lease_market::api::middleware::auth;
use lease_market::api::routes::{resource_routes, verification_routes};
use lease_market::application::services::{
    AuthService, ConsultationService, ListingService, UploadService, VerificationService,
};
use lease_market::domain::entities::{
    Category, ListingDetails, ListingStatus, Region, Role, SocialIdentity,
};
use lease_market::infrastructure::oauth::{OAuthError, SocialAuthProvider};
use lease_market::infrastructure::persistence::{
    PgConsultationRepository, PgListingRepository, PgUserRepository, PgVerificationRepository,
};
use lease_market::infrastructure::sms::{SmsError, SmsSender};
use lease_market::infrastructure::storage::{PresignedUpload, StorageError, UploadSigner};
use lease_market::state::{AppState, ProviderStatus};
use lease_market::utils::jwt::JwtCodec;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-with-at-least-32-bytes";
pub const TEST_FRONTEND: &str = "http://frontend.test";
pub const GOOD_SOCIAL_CODE: &str = "good-code";

/// Records every SMS instead of sending it.
#[derive(Default)]
pub struct RecordingSms {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl RecordingSms {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    /// The six-digit code in the last message sent to `phone`.
    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        sent.iter().rev().find(|(to, _)| to == phone).and_then(|(_, text)| {
            text.split(|c: char| !c.is_ascii_digit())
                .find(|part| part.len() == 6)
                .map(str::to_string)
        })
    }
}

#[async_trait]
impl SmsSender for RecordingSms {
    async fn send(&self, to: &str, text: &str) -> Result<(), SmsError> {
        if self.fail {
            return Err(SmsError::Rejected {
                status: 500,
                body: "provider down".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), text.to_string()));
        Ok(())
    }
}

/// Accepts [`GOOD_SOCIAL_CODE`] as provider user `777`, rejects anything else.
pub struct FakeSocial;

#[async_trait]
impl SocialAuthProvider for FakeSocial {
    fn name(&self) -> &'static str {
        "kakao"
    }

    fn authorization_url(&self) -> Result<String, OAuthError> {
        Ok("https://kauth.example.com/oauth/authorize?client_id=test&response_type=code".to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<SocialIdentity, OAuthError> {
        if code == GOOD_SOCIAL_CODE {
            Ok(SocialIdentity {
                provider: "kakao".to_string(),
                provider_id: "777".to_string(),
                name: Some("Nick".to_string()),
            })
        } else {
            Err(OAuthError::Rejected {
                stage: "token",
                status: 401,
            })
        }
    }
}

pub struct FakeSigner;

impl UploadSigner for FakeSigner {
    fn presign_put(
        &self,
        key: &str,
        _content_type: &str,
        _now: DateTime<Utc>,
    ) -> Result<PresignedUpload, StorageError> {
        Ok(PresignedUpload {
            upload_url: format!("https://bucket.example.com/{key}?X-Amz-Signature=fake"),
            public_url: format!("https://bucket.example.com/{key}"),
        })
    }
}

pub fn create_test_state_with(pool: PgPool, sms: Arc<RecordingSms>) -> AppState {
    let pool = Arc::new(pool);

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let listing_repo = Arc::new(PgListingRepository::new(pool.clone()));
    let consultation_repo = Arc::new(PgConsultationRepository::new(pool.clone()));
    let verification_repo = Arc::new(PgVerificationRepository::new(pool.clone()));

    AppState {
        db: pool,
        auth_service: Arc::new(AuthService::new(
            user_repo.clone(),
            JwtCodec::new(TEST_JWT_SECRET),
            Arc::new(FakeSocial),
        )),
        listing_service: Arc::new(ListingService::new(
            listing_repo,
            user_repo,
            true,
            chrono::Weekday::Mon,
        )),
        consultation_service: Arc::new(ConsultationService::new(consultation_repo)),
        verification_service: Arc::new(VerificationService::new(verification_repo, sms)),
        upload_service: Arc::new(UploadService::new(Arc::new(FakeSigner))),
        frontend_origin: TEST_FRONTEND.to_string(),
        providers: ProviderStatus {
            sms: true,
            social_login: true,
            storage: true,
        },
    }
}

pub fn create_test_state(pool: PgPool) -> (AppState, Arc<RecordingSms>) {
    let sms = Arc::new(RecordingSms::default());
    (create_test_state_with(pool, sms.clone()), sms)
}

/// All routes behind the identity layer, without rate limiting.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(resource_routes())
        .merge(verification_routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state)
}

pub fn make_server(pool: PgPool) -> (TestServer, Arc<RecordingSms>) {
    let (state, sms) = create_test_state(pool);
    (TestServer::new(test_router(state)).unwrap(), sms)
}

/// Server whose listing details are hidden from non-admins until published.
pub fn make_private_preview_server(pool: PgPool) -> TestServer {
    let (mut state, _sms) = create_test_state(pool);
    state.listing_service = Arc::new(ListingService::new(
        Arc::new(PgListingRepository::new(state.db.clone())),
        Arc::new(PgUserRepository::new(state.db.clone())),
        false,
        chrono::Weekday::Mon,
    ));
    TestServer::new(test_router(state)).unwrap()
}

pub fn token_for(user_id: i64, role: Role) -> String {
    JwtCodec::new(TEST_JWT_SECRET).issue(user_id, role).unwrap()
}

/// Inserts an account without a password and returns its id.
pub async fn create_user(pool: &PgPool, email: &str, role: Role) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, name, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(email)
    .bind(email.split('@').next().unwrap_or("user"))
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Creates an administrator and returns a bearer token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    let id = create_user(pool, "admin@example.com", Role::Admin).await;
    token_for(id, Role::Admin)
}

/// Creates an ordinary user and returns `(id, token)`.
pub async fn user_token(pool: &PgPool, email: &str) -> (i64, String) {
    let id = create_user(pool, email, Role::User).await;
    (id, token_for(id, Role::User))
}

pub fn listing_details(name: &str, status: ListingStatus, key_money: i64) -> ListingDetails {
    ListingDetails {
        name: name.to_string(),
        summary: format!("{name} summary"),
        address: "1 Main St".to_string(),
        description: "Fully equipped".to_string(),
        image_url: "https://cdn.example.com/cover.jpg".to_string(),
        gallery_urls: vec![],
        region: Region::Metropolitan,
        category: Category::CafeBakery,
        deposit: 3000,
        monthly_rent: 200,
        key_money,
        monthly_revenue: 4000,
        material_cost: 1200,
        personnel_cost: 900,
        utility_cost: None,
        other_cost: None,
        delivery_percentage: None,
        net_profit: 1700,
        is_automated: false,
        has_parking: false,
        is_first_floor: true,
        is_near_station: false,
        status,
        is_best: false,
        is_weekly_best: false,
        featured_start: None,
        featured_end: None,
    }
}

pub async fn create_listing(pool: &PgPool, details: ListingDetails) -> i64 {
    use lease_market::domain::repositories::ListingRepository;

    PgListingRepository::new(Arc::new(pool.clone()))
        .create(details)
        .await
        .unwrap()
        .id
}

pub async fn create_published(pool: &PgPool, name: &str, key_money: i64) -> i64 {
    create_listing(pool, listing_details(name, ListingStatus::Published, key_money)).await
}
