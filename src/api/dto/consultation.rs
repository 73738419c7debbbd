//! DTOs for consultation requests.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{Gender, NewConsultationRequest};
use crate::utils::phone::{normalize_phone, validate_phone};

/// Request body for `POST /consultations`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsultationRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(range(min = 1, max = 120))]
    pub age: i32,
    pub gender: Gender,
    #[validate(length(min = 1, max = 100))]
    pub desired_category: String,
    #[validate(length(min = 1, max = 100))]
    pub desired_location: String,
    #[validate(range(min = 0))]
    pub investment_amount: i64,
    #[validate(length(max = 2000))]
    pub details: Option<String>,
}

impl From<CreateConsultationRequest> for NewConsultationRequest {
    fn from(r: CreateConsultationRequest) -> Self {
        NewConsultationRequest {
            name: r.name,
            phone: normalize_phone(&r.phone),
            age: r.age,
            gender: r.gender,
            desired_category: r.desired_category,
            desired_location: r.desired_location,
            investment_amount: r.investment_amount,
            details: r.details.filter(|d| !d.trim().is_empty()),
        }
    }
}
