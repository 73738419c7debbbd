//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, Role, SocialIdentity, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(&new_user.password_hash)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::conflict(
                "Email is already registered",
                json!({ "email": new_user.email }),
            )),
            other => Ok(other?),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn find_or_create_social(
        &self,
        identity: SocialIdentity,
        fallback_name: &str,
    ) -> Result<User, AppError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, provider, provider_id)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT users_provider_identity_key
            DO UPDATE SET provider = EXCLUDED.provider
            RETURNING *
            "#,
        )
        .bind(identity.name.as_deref().unwrap_or(fallback_name))
        .bind(&identity.provider)
        .bind(&identity.provider_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn set_role(&self, email: &str, role: Role) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET role = $2, updated_at = NOW()
            WHERE email = $1
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(role)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))
    }

    async fn list(&self, limit: i64) -> Result<Vec<User>, AppError> {
        let users =
            sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC, id DESC LIMIT $1")
                .bind(limit)
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(users)
    }
}
