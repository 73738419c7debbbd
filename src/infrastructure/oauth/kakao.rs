//! Kakao OAuth 2.0 client.

use super::service::{OAuthError, SocialAuthProvider};
use crate::domain::entities::SocialIdentity;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const AUTHORIZE_URL: &str = "https://kauth.kakao.com/oauth/authorize";
const TOKEN_URL: &str = "https://kauth.kakao.com/oauth/token";
const PROFILE_URL: &str = "https://kapi.kakao.com/v2/user/me";

#[derive(Debug, Clone)]
pub struct KakaoConfig {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
}

pub struct KakaoProvider {
    client: reqwest::Client,
    config: KakaoConfig,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Profile {
    id: i64,
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KakaoAccount {
    profile: Option<Properties>,
}

impl Profile {
    fn into_identity(self) -> SocialIdentity {
        let name = self
            .kakao_account
            .and_then(|account| account.profile)
            .and_then(|profile| profile.nickname)
            .or_else(|| self.properties.and_then(|p| p.nickname))
            .filter(|nickname| !nickname.trim().is_empty());

        SocialIdentity {
            provider: "kakao".to_string(),
            provider_id: self.id.to_string(),
            name,
        }
    }
}

impl KakaoProvider {
    pub fn new(config: KakaoConfig) -> Result<Self, OAuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        info!("✓ Social login: Kakao (redirect {})", config.redirect_uri);

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SocialAuthProvider for KakaoProvider {
    fn name(&self) -> &'static str {
        "kakao"
    }

    fn authorization_url(&self) -> Result<String, OAuthError> {
        let url = Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
            ],
        )?;

        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> Result<SocialIdentity, OAuthError> {
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];
        if let Some(secret) = &self.config.client_secret {
            form.push(("client_secret", secret.as_str()));
        }

        let response = self.client.post(TOKEN_URL).form(&form).send().await?;
        if !response.status().is_success() {
            return Err(OAuthError::Rejected {
                stage: "token exchange",
                status: response.status().as_u16(),
            });
        }
        let token: TokenResponse = response.json().await?;

        let response = self
            .client
            .get(PROFILE_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OAuthError::Rejected {
                stage: "profile fetch",
                status: response.status().as_u16(),
            });
        }
        let profile: Profile = response.json().await?;

        debug!(kakao_id = profile.id, "Kakao profile fetched");
        Ok(profile.into_identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> KakaoProvider {
        KakaoProvider::new(KakaoConfig {
            client_id: "client id".to_string(),
            client_secret: None,
            redirect_uri: "http://localhost:3000/auth/kakao/callback".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_authorization_url() {
        let url = Url::parse(&provider().authorization_url().unwrap()).unwrap();

        assert_eq!(url.host_str(), Some("kauth.kakao.com"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("client_id".into(), "client id".into())));
        assert!(pairs.contains(&(
            "redirect_uri".into(),
            "http://localhost:3000/auth/kakao/callback".into()
        )));
        assert!(pairs.contains(&("response_type".into(), "code".into())));
    }

    #[test]
    fn test_profile_prefers_account_nickname() {
        let profile: Profile = serde_json::from_str(
            r#"{"id": 123, "properties": {"nickname": "old"},
                "kakao_account": {"profile": {"nickname": "current"}}}"#,
        )
        .unwrap();

        let identity = profile.into_identity();
        assert_eq!(identity.provider, "kakao");
        assert_eq!(identity.provider_id, "123");
        assert_eq!(identity.name.as_deref(), Some("current"));
    }

    #[test]
    fn test_profile_falls_back_to_properties() {
        let profile: Profile =
            serde_json::from_str(r#"{"id": 5, "properties": {"nickname": "nick"}}"#).unwrap();
        assert_eq!(profile.into_identity().name.as_deref(), Some("nick"));
    }

    #[test]
    fn test_profile_without_nickname() {
        let profile: Profile = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(profile.into_identity().name, None);
    }
}
