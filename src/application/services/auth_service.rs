//! Registration, password login, bearer verification and social login.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::oauth::SocialAuthProvider;
use crate::utils::jwt::{Claims, JwtCodec};
use crate::utils::password::{hash_password, verify_password};

/// Display name given to social accounts whose provider profile has none.
pub const SOCIAL_FALLBACK_NAME: &str = "Kakao user";

/// Service for account credentials and access tokens.
///
/// Passwords are hashed with Argon2id on the blocking thread pool. Access
/// tokens are HS256 JWTs carrying the user id and role, valid for one day.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtCodec,
    social: Arc<dyn SocialAuthProvider>,
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password", json!({}))
}

impl<R: UserRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - credential store
    /// - `jwt` - token codec holding the signing secret
    /// - `social` - social login provider (may be disabled)
    pub fn new(repository: Arc<R>, jwt: JwtCodec, social: Arc<dyn SocialAuthProvider>) -> Self {
        Self {
            repository,
            jwt,
            social,
        }
    }

    /// Registers a password account with the default role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] if hashing or the database fails.
    pub async fn register(
        &self,
        email: String,
        name: String,
        password: String,
    ) -> Result<User, AppError> {
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "Email is already registered",
                json!({ "email": email }),
            ));
        }

        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::internal("Password hashing failed", json!({ "reason": e.to_string() })))?
            .map_err(|e| AppError::internal("Password hashing failed", json!({ "reason": e.to_string() })))?;

        let user = self
            .repository
            .create(NewUser {
                email,
                name,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Verifies a password and issues an access token.
    ///
    /// Unknown emails, social-only accounts and wrong passwords all produce
    /// the same error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the credentials do not match.
    /// Returns [`AppError::Internal`] on database or signing errors.
    pub async fn login(&self, email: &str, password: String) -> Result<String, AppError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let stored_hash = user.password_hash.clone().ok_or_else(invalid_credentials)?;

        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
                .await
                .map_err(|e| {
                    AppError::internal("Password verification failed", json!({ "reason": e.to_string() }))
                })?;

        if !matches {
            return Err(invalid_credentials());
        }

        self.issue_token(&user)
    }

    /// Returns the profile of an authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account no longer exists.
    pub async fn me(&self, user_id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))
    }

    /// URL that starts the social login flow.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if social login is not configured.
    pub fn social_login_url(&self) -> Result<String, AppError> {
        self.social.authorization_url().map_err(|e| {
            AppError::upstream("Social login unavailable", json!({ "reason": e.to_string() }))
        })
    }

    /// Completes a social login and issues an access token.
    ///
    /// The account is keyed by provider and provider user id. A provider email
    /// is never matched against local accounts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the provider exchange fails.
    /// Returns [`AppError::Internal`] on database or signing errors.
    pub async fn handle_social_login(&self, code: &str) -> Result<String, AppError> {
        let identity = self.social.exchange_code(code).await.map_err(|e| {
            warn!(provider = self.social.name(), error = %e, "Social login exchange failed");
            AppError::upstream("Social login failed", json!({ "reason": e.to_string() }))
        })?;

        let user = self
            .repository
            .find_or_create_social(identity, SOCIAL_FALLBACK_NAME)
            .await?;

        info!(user_id = user.id, provider = self.social.name(), "Social login");
        self.issue_token(&user)
    }

    /// Decodes a bearer token into its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the signature is invalid, the
    /// token is malformed or it has expired.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        self.jwt.verify(token).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "Token has expired",
                _ => "Invalid token",
            };
            AppError::unauthorized("Unauthorized", json!({ "reason": reason }))
        })
    }

    fn issue_token(&self, user: &User) -> Result<String, AppError> {
        self.jwt.issue(user.id, user.role).map_err(|e| {
            AppError::internal("Failed to issue token", json!({ "reason": e.to_string() }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Role, SocialIdentity};
    use crate::domain::repositories::MockUserRepository;
    use crate::infrastructure::oauth::{MockSocialAuthProvider, OAuthError};
    use chrono::Utc;

    const SECRET: &str = "test-secret";

    fn user(id: i64, password_hash: Option<String>) -> User {
        User {
            id,
            email: Some("a@x.com".to_string()),
            name: "A".to_string(),
            password_hash,
            role: Role::User,
            provider: None,
            provider_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(repo: MockUserRepository, social: MockSocialAuthProvider) -> AuthService<MockUserRepository> {
        AuthService::new(Arc::new(repo), JwtCodec::new(SECRET), Arc::new(social))
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| {
                new_user.email == "a@x.com"
                    && new_user.password_hash.starts_with("$argon2id$")
                    && verify_password("pw123456", &new_user.password_hash)
            })
            .times(1)
            .returning(|new_user| Ok(user(1, Some(new_user.password_hash))));

        let result = service(repo, MockSocialAuthProvider::new())
            .register("a@x.com".to_string(), "A".to_string(), "pw123456".to_string())
            .await;

        assert_eq!(result.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(user(1, None))));
        repo.expect_create().times(0);

        let result = service(repo, MockSocialAuthProvider::new())
            .register("a@x.com".to_string(), "A".to_string(), "pw123456".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let hash = hash_password("pw123456").unwrap();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user(7, Some(hash.clone())))));

        let service = service(repo, MockSocialAuthProvider::new());
        let token = service.login("a@x.com", "pw123456".to_string()).await.unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let hash = hash_password("pw123456").unwrap();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user(7, Some(hash.clone())))));

        let result = service(repo, MockSocialAuthProvider::new())
            .login("a@x.com", "wrong-password".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let result = service(repo, MockSocialAuthProvider::new())
            .login("nobody@x.com", "pw123456".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_social_only_account() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(user(7, None))));

        let result = service(repo, MockSocialAuthProvider::new())
            .login("a@x.com", "pw123456".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_me_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo, MockSocialAuthProvider::new()).me(3).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_social_login_uses_fallback_name() {
        let mut social = MockSocialAuthProvider::new();
        social.expect_name().return_const("kakao");
        social.expect_exchange_code().times(1).returning(|_| {
            Ok(SocialIdentity {
                provider: "kakao".to_string(),
                provider_id: "123".to_string(),
                name: None,
            })
        });

        let mut repo = MockUserRepository::new();
        repo.expect_find_or_create_social()
            .withf(|identity, fallback| identity.provider_id == "123" && fallback == "Kakao user")
            .times(1)
            .returning(|_, _| Ok(user(9, None)));

        let service = service(repo, social);
        let token = service.handle_social_login("code").await.unwrap();

        assert_eq!(service.verify_token(&token).unwrap().sub, 9);
    }

    #[tokio::test]
    async fn test_social_login_provider_failure() {
        let mut social = MockSocialAuthProvider::new();
        social.expect_name().return_const("kakao");
        social
            .expect_exchange_code()
            .returning(|_| Err(OAuthError::Rejected { stage: "token exchange", status: 401 }));

        let mut repo = MockUserRepository::new();
        repo.expect_find_or_create_social().times(0);

        let result = service(repo, social).handle_social_login("bad").await;

        assert!(matches!(result.unwrap_err(), AppError::Upstream { .. }));
    }

    #[test]
    fn test_verify_token_rejects_other_secret() {
        let token = JwtCodec::new("other-secret").issue(1, Role::Admin).unwrap();
        let service = service(MockUserRepository::new(), MockSocialAuthProvider::new());

        assert!(matches!(
            service.verify_token(&token).unwrap_err(),
            AppError::Unauthorized { .. }
        ));
    }
}
