//! Consultation request entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "consultation_gender", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

/// A submitted inquiry from a prospective operator.
///
/// Not linked to a user account; anyone may submit one.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub age: i32,
    pub gender: Gender,
    pub desired_category: String,
    pub desired_location: String,
    pub investment_amount: i64,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for a new consultation request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConsultationRequest {
    pub name: String,
    pub phone: String,
    pub age: i32,
    pub gender: Gender,
    pub desired_category: String,
    pub desired_location: String,
    pub investment_amount: i64,
    pub details: Option<String>,
}
