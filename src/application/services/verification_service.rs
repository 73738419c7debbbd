//! Phone verification codes.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::VerificationChannel;
use crate::domain::repositories::VerificationRepository;
use crate::error::AppError;
use crate::infrastructure::sms::SmsSender;

/// How long an issued code stays valid.
pub const CODE_TTL: Duration = Duration::minutes(3);

/// Uniform six-digit code, zero padded.
pub fn generate_code() -> String {
    format!("{:06}", rand::rng().random_range(0..1_000_000u32))
}

fn message_text(code: &str) -> String {
    format!("[Lease Market] Your verification code is {code}. It expires in 3 minutes.")
}

/// Service for issuing and redeeming verification codes.
///
/// Each phone number has at most one live code; issuing replaces it. A code
/// can be redeemed once.
pub struct VerificationService<R: VerificationRepository> {
    repository: Arc<R>,
    sms: Arc<dyn SmsSender>,
}

impl<R: VerificationRepository> VerificationService<R> {
    pub fn new(repository: Arc<R>, sms: Arc<dyn SmsSender>) -> Self {
        Self { repository, sms }
    }

    /// Issues a fresh code for `phone` and sends it by SMS.
    ///
    /// The code is stored before sending, so a failed send leaves a valid
    /// code behind. Returns the expiry instant.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the SMS provider fails.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn send_code(&self, phone: &str) -> Result<DateTime<Utc>, AppError> {
        let code = generate_code();
        let expires_at = Utc::now() + CODE_TTL;

        self.repository
            .upsert(VerificationChannel::Phone, phone, &code, expires_at)
            .await?;

        self.sms
            .send(phone, &message_text(&code))
            .await
            .map_err(|e| {
                warn!(error = %e, "Verification SMS failed");
                AppError::upstream(
                    "Failed to send verification code",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        info!("Verification code sent");
        Ok(expires_at)
    }

    /// Redeems a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no code is live for `phone`, the code
    /// differs, or it was already redeemed.
    /// Returns [`AppError::Expired`] if the code is past its expiry; the stale
    /// record is kept.
    pub async fn check_code(&self, phone: &str, code: &str) -> Result<(), AppError> {
        if self
            .repository
            .redeem(VerificationChannel::Phone, phone, code)
            .await?
            .is_some()
        {
            info!("Phone number verified");
            return Ok(());
        }

        // Nothing was redeemed; look again only to pick the error.
        match self.repository.find(VerificationChannel::Phone, phone).await? {
            Some(record) if record.code == code && record.is_expired_at(Utc::now()) => {
                Err(AppError::expired(
                    "Verification code has expired",
                    json!({ "expiredAt": record.expires_at }),
                ))
            }
            _ => Err(AppError::not_found("Invalid verification code", json!({}))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::VerificationCode;
    use crate::domain::repositories::MockVerificationRepository;
    use crate::infrastructure::sms::{MockSmsSender, SmsError};

    fn record(code: &str, expires_at: DateTime<Utc>) -> VerificationCode {
        VerificationCode {
            id: 1,
            channel: VerificationChannel::Phone,
            target: "01012345678".to_string(),
            code: code.to_string(),
            expires_at,
            created_at: expires_at - CODE_TTL,
        }
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn test_send_code_stores_then_sends() {
        let mut repo = MockVerificationRepository::new();
        repo.expect_upsert()
            .withf(|channel, target, code, expires_at| {
                *channel == VerificationChannel::Phone
                    && target == "01012345678"
                    && code.len() == 6
                    && *expires_at > Utc::now() + Duration::minutes(2)
            })
            .times(1)
            .returning(|_, target, code, expires_at| {
                let mut stored = record(code, expires_at);
                stored.target = target.to_string();
                Ok(stored)
            });

        let mut sms = MockSmsSender::new();
        sms.expect_send()
            .withf(|to, text| to == "01012345678" && text.contains("verification code"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = VerificationService::new(Arc::new(repo), Arc::new(sms));

        assert!(service.send_code("01012345678").await.is_ok());
    }

    #[tokio::test]
    async fn test_send_code_provider_failure() {
        let mut repo = MockVerificationRepository::new();
        repo.expect_upsert()
            .times(1)
            .returning(|_, _, code, expires_at| Ok(record(code, expires_at)));

        let mut sms = MockSmsSender::new();
        sms.expect_send()
            .times(1)
            .returning(|_, _| Err(SmsError::Rejected { status: 400, body: "bad".into() }));

        let service = VerificationService::new(Arc::new(repo), Arc::new(sms));
        let result = service.send_code("01012345678").await;

        assert!(matches!(result.unwrap_err(), AppError::Upstream { .. }));
    }

    #[tokio::test]
    async fn test_check_code_success_redeems() {
        let mut repo = MockVerificationRepository::new();
        let expires_at = Utc::now() + Duration::minutes(1);
        repo.expect_redeem()
            .withf(|channel, target, code| {
                *channel == VerificationChannel::Phone
                    && target == "01012345678"
                    && code == "123456"
            })
            .times(1)
            .returning(move |_, _, code| Ok(Some(record(code, expires_at))));
        repo.expect_find().times(0);

        let service = VerificationService::new(Arc::new(repo), Arc::new(MockSmsSender::new()));

        assert!(service.check_code("01012345678", "123456").await.is_ok());
    }

    #[tokio::test]
    async fn test_check_code_mismatch() {
        let mut repo = MockVerificationRepository::new();
        let expires_at = Utc::now() + Duration::minutes(1);
        repo.expect_redeem().times(1).returning(|_, _, _| Ok(None));
        repo.expect_find()
            .returning(move |_, _| Ok(Some(record("123456", expires_at))));

        let service = VerificationService::new(Arc::new(repo), Arc::new(MockSmsSender::new()));
        let result = service.check_code("01012345678", "654321").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_check_code_expired_keeps_record() {
        let mut repo = MockVerificationRepository::new();
        let expires_at = Utc::now() - Duration::seconds(1);
        repo.expect_redeem().times(1).returning(|_, _, _| Ok(None));
        repo.expect_find()
            .returning(move |_, _| Ok(Some(record("123456", expires_at))));

        let service = VerificationService::new(Arc::new(repo), Arc::new(MockSmsSender::new()));
        let result = service.check_code("01012345678", "123456").await;

        assert!(matches!(result.unwrap_err(), AppError::Expired { .. }));
    }

    #[tokio::test]
    async fn test_check_code_superseded_by_resend() {
        // The resend landed first: the stored code is no longer the one sent before.
        let mut repo = MockVerificationRepository::new();
        let expires_at = Utc::now() + Duration::minutes(3);
        repo.expect_redeem()
            .withf(|_, _, code| code == "111111")
            .times(1)
            .returning(|_, _, _| Ok(None));
        repo.expect_find()
            .returning(move |_, _| Ok(Some(record("222222", expires_at))));

        let service = VerificationService::new(Arc::new(repo), Arc::new(MockSmsSender::new()));
        let result = service.check_code("01012345678", "111111").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_check_code_lost_race() {
        let mut repo = MockVerificationRepository::new();
        repo.expect_redeem().returning(|_, _, _| Ok(None));
        repo.expect_find().returning(|_, _| Ok(None));

        let service = VerificationService::new(Arc::new(repo), Arc::new(MockSmsSender::new()));
        let result = service.check_code("01012345678", "123456").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_check_code_unknown_phone() {
        let mut repo = MockVerificationRepository::new();
        repo.expect_redeem().returning(|_, _, _| Ok(None));
        repo.expect_find().returning(|_, _| Ok(None));

        let service = VerificationService::new(Arc::new(repo), Arc::new(MockSmsSender::new()));
        let result = service.check_code("01099999999", "123456").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
