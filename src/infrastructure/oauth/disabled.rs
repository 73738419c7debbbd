use super::service::{OAuthError, SocialAuthProvider};
use crate::domain::entities::SocialIdentity;
use async_trait::async_trait;

/// Social login provider used when `KAKAO_*` settings are absent.
pub struct DisabledSocialAuth;

#[async_trait]
impl SocialAuthProvider for DisabledSocialAuth {
    fn name(&self) -> &'static str {
        "kakao"
    }

    fn authorization_url(&self) -> Result<String, OAuthError> {
        Err(OAuthError::Disabled)
    }

    async fn exchange_code(&self, _code: &str) -> Result<SocialIdentity, OAuthError> {
        Err(OAuthError::Disabled)
    }
}
