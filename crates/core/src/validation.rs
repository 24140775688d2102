//! Shared field validation helpers.
//!
//! The `*_rule` functions plug into `#[validate(custom(function = ...))]`;
//! the `require_*` functions return [`CoreError::Validation`] directly.

use std::borrow::Cow;

use validator::ValidationError;

use crate::error::CoreError;

/// Minimum number of digits a phone number must carry.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Allowed Lead rating range (inclusive).
pub const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Loose address check: something before `@` and a dot after it.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    match email.find('@') {
        Some(at) => at > 0 && email[at + 1..].contains('.'),
        None => false,
    }
}

pub fn is_valid_phone(phone: &str) -> bool {
    only_digits(phone).len() >= MIN_PHONE_DIGITS
}

// ---------------------------------------------------------------------------
// validator rules
// ---------------------------------------------------------------------------

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn not_blank_rule(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(rule_error("blank", "must not be blank"));
    }
    Ok(())
}

pub fn email_rule(value: &str) -> Result<(), ValidationError> {
    if !is_valid_email(value) {
        return Err(rule_error("email", "must be a valid e-mail address"));
    }
    Ok(())
}

pub fn phone_rule(value: &str) -> Result<(), ValidationError> {
    if !is_valid_phone(value) {
        return Err(rule_error("phone", "must contain at least 10 digits"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CoreError helpers
// ---------------------------------------------------------------------------

/// Reject a blank required field.
pub fn require_not_blank(value: &str, field: &str) -> Result<(), CoreError> {
    if is_blank(value) {
        return Err(CoreError::Validation(format!("{field}: must not be blank")));
    }
    Ok(())
}

/// Check an optional e-mail; absent or blank values pass.
pub fn require_email_shape(value: Option<&str>, field: &str) -> Result<(), CoreError> {
    match value {
        Some(email) if !is_blank(email) && !is_valid_email(email) => Err(CoreError::Validation(
            format!("{field}: must be a valid e-mail address"),
        )),
        _ => Ok(()),
    }
}

/// Check an optional phone number; absent or blank values pass.
pub fn require_phone_shape(value: Option<&str>, field: &str) -> Result<(), CoreError> {
    match value {
        Some(phone) if !is_blank(phone) && !is_valid_phone(phone) => Err(CoreError::Validation(
            format!("{field}: must contain at least {MIN_PHONE_DIGITS} digits"),
        )),
        _ => Ok(()),
    }
}

/// Check a phone that will overwrite stored values. Blank counts as invalid.
pub fn require_phone_if_present(value: Option<&str>, field: &str) -> Result<(), CoreError> {
    match value {
        Some(phone) if !is_valid_phone(phone) => Err(CoreError::Validation(format!(
            "{field}: must contain at least {MIN_PHONE_DIGITS} digits"
        ))),
        _ => Ok(()),
    }
}

/// Check an optional rating against [`RATING_RANGE`].
pub fn require_rating(value: Option<i64>) -> Result<(), CoreError> {
    match value {
        Some(rating) if !RATING_RANGE.contains(&rating) => Err(CoreError::Validation(format!(
            "rating: must be between 1 and 5, got {rating}"
        ))),
        _ => Ok(()),
    }
}
