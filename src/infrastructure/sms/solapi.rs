//! Solapi messaging API client.

use super::service::{SmsError, SmsSender};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde_json::json;
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, info};

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_ENDPOINT: &str = "https://api.solapi.com/messages/v4/send";

/// Credentials and sender number for the Solapi API.
#[derive(Debug, Clone)]
pub struct SolapiConfig {
    pub api_key: String,
    pub api_secret: String,
    /// Registered caller number messages are sent from.
    pub sender: String,
}

/// Sends messages through `POST /messages/v4/send`.
pub struct SolapiSender {
    client: reqwest::Client,
    config: SolapiConfig,
    endpoint: String,
}

impl SolapiSender {
    pub fn new(config: SolapiConfig) -> Result<Self, SmsError> {
        Self::with_endpoint(config, DEFAULT_ENDPOINT.to_string())
    }

    /// Builds a sender that posts to a custom endpoint.
    pub fn with_endpoint(config: SolapiConfig, endpoint: String) -> Result<Self, SmsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        info!("✓ SMS provider: Solapi (sender {})", config.sender);

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }
}

/// Builds the `Authorization` header value.
///
/// The signature is `hex(HMAC-SHA256(api_secret, date + salt))`.
pub fn authorization_header(api_key: &str, api_secret: &str, date: &str, salt: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(api_secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(date.as_bytes());
    mac.update(salt.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    format!("HMAC-SHA256 apiKey={api_key}, date={date}, salt={salt}, signature={signature}")
}

fn random_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[async_trait]
impl SmsSender for SolapiSender {
    async fn send(&self, to: &str, text: &str) -> Result<(), SmsError> {
        let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let auth = authorization_header(
            &self.config.api_key,
            &self.config.api_secret,
            &date,
            &random_salt(),
        );

        let body = json!({
            "message": {
                "to": to,
                "from": self.config.sender,
                "text": text,
            }
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SmsError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(to, "SMS accepted by Solapi");
        Ok(())
    }
}
