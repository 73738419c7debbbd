//! Social login provider trait and error types.

use crate::domain::entities::SocialIdentity;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("social login is not configured")]
    Disabled,

    #[error("OAuth request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OAuth provider returned {status} during {stage}")]
    Rejected { stage: &'static str, status: u16 },

    #[error("invalid authorization URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// An OAuth 2.0 authorization-code provider.
///
/// # Implementations
///
/// - [`crate::infrastructure::oauth::KakaoProvider`] - Kakao accounts
/// - [`crate::infrastructure::oauth::DisabledSocialAuth`] - Always fails with [`OAuthError::Disabled`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialAuthProvider: Send + Sync {
    /// Provider name stored alongside the provider user id.
    fn name(&self) -> &'static str;

    /// URL the browser is sent to in order to start the login.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Disabled`] if the provider is not configured.
    fn authorization_url(&self) -> Result<String, OAuthError>;

    /// Exchanges an authorization code for the caller's provider identity.
    ///
    /// Makes one token request and one profile request, without retries.
    ///
    /// # Errors
    ///
    /// Returns an [`OAuthError`] if either request fails or is rejected.
    async fn exchange_code(&self, code: &str) -> Result<SocialIdentity, OAuthError>;
}
