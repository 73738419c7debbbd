//! PostgreSQL implementation of the consultation repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ConsultationRequest, NewConsultationRequest};
use crate::domain::repositories::ConsultationRepository;
use crate::error::AppError;

pub struct PgConsultationRepository {
    pool: Arc<PgPool>,
}

impl PgConsultationRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConsultationRepository for PgConsultationRepository {
    async fn create(
        &self,
        request: NewConsultationRequest,
    ) -> Result<ConsultationRequest, AppError> {
        let created = sqlx::query_as::<_, ConsultationRequest>(
            r#"
            INSERT INTO consultation_requests
                (name, phone, age, gender, desired_category, desired_location,
                 investment_amount, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(request.name)
        .bind(request.phone)
        .bind(request.age)
        .bind(request.gender)
        .bind(request.desired_category)
        .bind(request.desired_location)
        .bind(request.investment_amount)
        .bind(request.details)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<ConsultationRequest>, AppError> {
        let requests = sqlx::query_as::<_, ConsultationRequest>(
            "SELECT * FROM consultation_requests ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(requests)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM consultation_requests WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Consultation request not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }
}
