//! Korean mobile phone numbers.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// `01X` prefix followed by 7-8 ASCII digits, hyphens optional.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^01[016789]-?[0-9]{3,4}-?[0-9]{4}$").expect("valid phone regex"));

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Invalid phone number".into()))
    }
}

/// Strips separators so `010-1234-5678` and `01012345678` are the same target.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("01012345678").is_ok());
        assert!(validate_phone("010-1234-5678").is_ok());
        assert!(validate_phone("011-123-4567").is_ok());
        assert!(validate_phone("0212345678").is_err());
        assert!(validate_phone("010123456789").is_err());
        assert!(validate_phone("phone").is_err());
    }

    #[test]
    fn test_validate_phone_rejects_non_ascii_digits() {
        // Arabic-Indic and fullwidth digits would be dropped by normalization.
        assert!(validate_phone("010\u{0661}\u{0662}\u{0663}\u{0664}\u{0665}\u{0666}\u{0667}\u{0668}").is_err());
        assert!(validate_phone("010-\u{FF11}\u{FF12}\u{FF13}\u{FF14}-5678").is_err());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("010-1234-5678"), "01012345678");
        assert_eq!(normalize_phone("01012345678"), "01012345678");
    }
}
