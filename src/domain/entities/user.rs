//! User entity and account roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role. The set is closed: everything is either an ordinary user or
/// an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A registered account.
///
/// Local accounts carry an email and an Argon2 `password_hash`; accounts created
/// through social login carry `provider`/`provider_id` and no password.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: Option<String>,
    pub name: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub provider: Option<String>,
    pub provider_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns true if the account can sign in with a password.
    pub fn has_local_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Input data for a password-based registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Identity returned by a social login provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialIdentity {
    pub provider: String,
    pub provider_id: String,
    pub name: Option<String>,
}
