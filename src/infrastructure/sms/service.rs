//! SMS sender trait and error types.

use async_trait::async_trait;

/// Errors that can occur while handing a message to the provider.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    #[error("SMS provider is not configured")]
    Disabled,

    #[error("SMS request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("SMS provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Sends a single text message.
///
/// Implementations make exactly one attempt per call.
///
/// # Implementations
///
/// - [`crate::infrastructure::sms::SolapiSender`] - Solapi REST API
/// - [`crate::infrastructure::sms::DisabledSms`] - Always fails with [`SmsError::Disabled`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Delivers `text` to the phone number `to`.
    ///
    /// # Errors
    ///
    /// Returns an [`SmsError`] if the provider could not be reached or did not
    /// accept the message.
    async fn send(&self, to: &str, text: &str) -> Result<(), SmsError>;
}
