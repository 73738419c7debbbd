//! DTOs for phone verification.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::phone::validate_phone;

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("valid code regex"));

/// Request body for `POST /verification/send`.
#[derive(Debug, Deserialize, Validate)]
pub struct SendCodeRequest {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

/// Request body for `POST /verification/check`.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckCodeRequest {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(regex(path = *CODE_RE, message = "Code must be 6 digits"))]
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_code_format() {
        let ok = CheckCodeRequest {
            phone: "01012345678".to_string(),
            code: "012345".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = CheckCodeRequest {
            phone: "01012345678".to_string(),
            code: "12345".to_string(),
        };
        assert!(short.validate().is_err());

        let letters = CheckCodeRequest {
            phone: "01012345678".to_string(),
            code: "12a456".to_string(),
        };
        assert!(letters.validate().is_err());

        let arabic_indic = CheckCodeRequest {
            phone: "01012345678".to_string(),
            code: "\u{0661}\u{0662}\u{0663}\u{0664}\u{0665}\u{0666}".to_string(),
        };
        assert!(arabic_indic.validate().is_err());
    }

    #[test]
    fn test_send_code_phone() {
        assert!(SendCodeRequest { phone: "010-9876-5432".to_string() }.validate().is_ok());
        assert!(SendCodeRequest { phone: "+82 10".to_string() }.validate().is_err());
    }
}
