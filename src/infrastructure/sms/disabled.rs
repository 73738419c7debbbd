use super::service::{SmsError, SmsSender};
use async_trait::async_trait;
use tracing::warn;

/// SMS sender used when `SOLAPI_*` settings are absent.
pub struct DisabledSms;

#[async_trait]
impl SmsSender for DisabledSms {
    async fn send(&self, to: &str, _text: &str) -> Result<(), SmsError> {
        warn!(to, "SMS send requested but no provider is configured");
        Err(SmsError::Disabled)
    }
}
