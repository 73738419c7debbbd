//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, Role, SocialIdentity, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the credential store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_user.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a password-based account with the default role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Returns the account bound to a social identity, creating it on first login.
    ///
    /// The lookup and the insert are a single statement, so two concurrent first
    /// logins resolve to the same account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_or_create_social(
        &self,
        identity: SocialIdentity,
        fallback_name: &str,
    ) -> Result<User, AppError>;

    /// Changes a user's role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this email.
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_role(&self, email: &str, role: Role) -> Result<User, AppError>;

    /// Lists users, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, limit: i64) -> Result<Vec<User>, AppError>;
}
