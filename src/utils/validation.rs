use axum::{http::StatusCode, response::IntoResponse, Json};
use regex::Regex;
use serde_json::json;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub fn into_response(errors: ValidationErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Validation failed", "errors": errors})),
    )
        .into_response()
}

fn matches(pattern: &str, value: &str) -> bool {
    Regex::new(pattern)
        .map(|regex| regex.is_match(value))
        .unwrap_or(false)
}

pub fn is_numeric_phone_number(phone_number: &str) -> bool {
    matches(r"^\d+$", phone_number)
}

pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    match is_numeric_phone_number(phone_number) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_PHONE_NUMBER")
            .with_message(Cow::from("Phone number must contain digits only"))),
    }
}

pub fn validate_account_number(account_number: &str) -> Result<(), ValidationError> {
    match matches(r"^\d{10}$", account_number) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_ACCOUNT_NUMBER")
            .with_message(Cow::from("Account number must be 10 digits"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_digit_only_phone_numbers() {
        assert!(is_numeric_phone_number("08012345678"));
        assert!(validate_phone_number("2348012345678").is_ok());
    }

    #[test]
    fn rejects_formatted_phone_numbers() {
        assert!(!is_numeric_phone_number("+2348012345678"));
        assert!(!is_numeric_phone_number("0801 234 5678"));
        assert!(!is_numeric_phone_number(""));
    }

    #[test]
    fn account_numbers_are_ten_digits() {
        assert!(validate_account_number("0123456789").is_ok());
        assert!(validate_account_number("012345678").is_err());
        assert!(validate_account_number("01234567ab").is_err());
    }
}
