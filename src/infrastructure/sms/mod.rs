//! Outbound SMS delivery.
//!
//! Provides an [`SmsSender`] trait with two implementations:
//! - [`SolapiSender`] - Solapi messaging REST API
//! - [`DisabledSms`] - Installed when no provider is configured; every send fails

mod disabled;
mod service;
mod solapi;

pub use disabled::DisabledSms;
pub use service::{SmsError, SmsSender};
pub use solapi::{SolapiConfig, SolapiSender};

#[cfg(test)]
pub use service::MockSmsSender;
