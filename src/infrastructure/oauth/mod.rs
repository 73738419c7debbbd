//! Social login providers.
//!
//! Provides a [`SocialAuthProvider`] trait with two implementations:
//! - [`KakaoProvider`] - Kakao OAuth 2.0 authorization-code flow
//! - [`DisabledSocialAuth`] - Installed when no provider is configured

mod disabled;
mod kakao;
mod service;

pub use disabled::DisabledSocialAuth;
pub use kakao::{KakaoConfig, KakaoProvider};
pub use service::{OAuthError, SocialAuthProvider};

#[cfg(test)]
pub use service::MockSocialAuthProvider;
