//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, provider clients and the Axum
//! server lifecycle.

use crate::application::services::{
    AuthService, ConsultationService, ListingService, UploadService, VerificationService,
};
use crate::config::Config;
use crate::infrastructure::oauth::{DisabledSocialAuth, KakaoProvider, SocialAuthProvider};
use crate::infrastructure::persistence::{
    PgConsultationRepository, PgListingRepository, PgUserRepository, PgVerificationRepository,
};
use crate::infrastructure::sms::{DisabledSms, SmsSender, SolapiSender};
use crate::infrastructure::storage::{DisabledStorage, S3Presigner, UploadSigner};
use crate::routes::app_router;
use crate::state::{AppState, ProviderStatus};
use crate::utils::jwt::JwtCodec;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Provider clients chosen at startup.
pub struct Providers {
    pub sms: Arc<dyn SmsSender>,
    pub social: Arc<dyn SocialAuthProvider>,
    pub storage: Arc<dyn UploadSigner>,
    pub status: ProviderStatus,
}

impl Providers {
    /// Builds a real client for every configured provider group and a
    /// disabled one for the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut status = ProviderStatus::default();

        let sms: Arc<dyn SmsSender> = match config.sms.clone() {
            Some(solapi) => {
                status.sms = true;
                Arc::new(SolapiSender::new(solapi).context("Failed to build SMS client")?)
            }
            None => {
                tracing::warn!("SMS disabled: SOLAPI_* not configured");
                Arc::new(DisabledSms)
            }
        };

        let social: Arc<dyn SocialAuthProvider> = match config.kakao.clone() {
            Some(kakao) => {
                status.social_login = true;
                Arc::new(KakaoProvider::new(kakao).context("Failed to build Kakao client")?)
            }
            None => {
                tracing::warn!("Social login disabled: KAKAO_* not configured");
                Arc::new(DisabledSocialAuth)
            }
        };

        let storage: Arc<dyn UploadSigner> = match config.storage.clone() {
            Some(s3) => {
                status.storage = true;
                Arc::new(S3Presigner::new(s3))
            }
            None => {
                tracing::warn!("Uploads disabled: AWS_* not configured");
                Arc::new(DisabledStorage)
            }
        };

        Ok(Self {
            sms,
            social,
            storage,
            status,
        })
    }
}

/// Wires repositories, services and providers into the shared state.
pub fn build_state(config: &Config, pool: PgPool, providers: Providers) -> AppState {
    let pool = Arc::new(pool);

    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let listing_repository = Arc::new(PgListingRepository::new(pool.clone()));
    let consultation_repository = Arc::new(PgConsultationRepository::new(pool.clone()));
    let verification_repository = Arc::new(PgVerificationRepository::new(pool.clone()));

    AppState {
        db: pool,
        auth_service: Arc::new(AuthService::new(
            user_repository.clone(),
            JwtCodec::new(&config.jwt_secret),
            providers.social,
        )),
        listing_service: Arc::new(ListingService::new(
            listing_repository,
            user_repository,
            config.listing_preview_public,
            config.stats_week_start,
        )),
        consultation_service: Arc::new(ConsultationService::new(consultation_repository)),
        verification_service: Arc::new(VerificationService::new(
            verification_repository,
            providers.sms,
        )),
        upload_service: Arc::new(UploadService::new(providers.storage)),
        frontend_origin: config.cors_origin.clone(),
        providers: providers.status,
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Provider clients (or disabled fallbacks)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - A provider client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let providers = Providers::from_config(&config)?;
    let state = build_state(&config, pool, providers);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
