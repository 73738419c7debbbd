//! PostgreSQL implementation of the verification code repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{VerificationChannel, VerificationCode};
use crate::domain::repositories::VerificationRepository;
use crate::error::AppError;

pub struct PgVerificationRepository {
    pool: Arc<PgPool>,
}

impl PgVerificationRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationRepository for PgVerificationRepository {
    async fn upsert(
        &self,
        channel: VerificationChannel,
        target: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationCode, AppError> {
        let stored = sqlx::query_as::<_, VerificationCode>(
            r#"
            INSERT INTO verification_codes (channel, target, code, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT verification_codes_channel_target_key
            DO UPDATE SET code = EXCLUDED.code,
                          expires_at = EXCLUDED.expires_at,
                          created_at = NOW()
            RETURNING *
            "#,
        )
        .bind(channel)
        .bind(target)
        .bind(code)
        .bind(expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(stored)
    }

    async fn find(
        &self,
        channel: VerificationChannel,
        target: &str,
    ) -> Result<Option<VerificationCode>, AppError> {
        let code = sqlx::query_as::<_, VerificationCode>(
            "SELECT * FROM verification_codes WHERE channel = $1 AND target = $2",
        )
        .bind(channel)
        .bind(target)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(code)
    }

    async fn redeem(
        &self,
        channel: VerificationChannel,
        target: &str,
        code: &str,
    ) -> Result<Option<VerificationCode>, AppError> {
        let redeemed = sqlx::query_as::<_, VerificationCode>(
            r#"
            DELETE FROM verification_codes
            WHERE channel = $1 AND target = $2 AND code = $3 AND expires_at >= NOW()
            RETURNING *
            "#,
        )
        .bind(channel)
        .bind(target)
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(redeemed)
    }
}
