//! Short-lived verification codes.

use chrono::{DateTime, Utc};

/// Delivery channel a code was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "verification_channel", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationChannel {
    Phone,
}

/// The live code for one `(channel, target)` pair.
///
/// Issuing a new code overwrites the previous one. A successful check deletes
/// the record; an expired record stays until it is overwritten.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VerificationCode {
    pub id: i64,
    pub channel: VerificationChannel,
    pub target: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Returns true once `now` is past the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
