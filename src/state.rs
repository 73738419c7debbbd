//! Shared application state handed to every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, ConsultationService, ListingService, UploadService, VerificationService,
};
use crate::infrastructure::persistence::{
    PgConsultationRepository, PgListingRepository, PgUserRepository, PgVerificationRepository,
};

/// Which external providers were configured at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderStatus {
    pub sms: bool,
    pub social_login: bool,
    pub storage: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub listing_service: Arc<ListingService<PgListingRepository, PgUserRepository>>,
    pub consultation_service: Arc<ConsultationService<PgConsultationRepository>>,
    pub verification_service: Arc<VerificationService<PgVerificationRepository>>,
    pub upload_service: Arc<UploadService>,
    /// Browser-facing origin social login redirects back to.
    pub frontend_origin: String,
    pub providers: ProviderStatus,
}
