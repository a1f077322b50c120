//! Reusable form field validators
//!
//! Every validator receives the field label and the raw input text and
//! returns a user-facing message on failure. Blank input is only rejected
//! by [`required`]; the other validators let it through.

use regex::Regex;
use std::sync::OnceLock;

/// Boxed validator as stored in [`FormRules`](super::FormRules)
pub type Validator = Box<dyn Fn(&str, &str) -> Result<(), String> + Send + Sync>;

/// Validator: field must not be blank
pub fn required() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        if value.trim().is_empty() {
            Err(format!("{} is required", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be a whole number greater than zero
pub fn positive_integer() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }
        match value.parse::<u32>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err(format!(
                "{} must be a positive whole number (got: {})",
                field, value
            )),
        }
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        if value.is_empty() || allowed.iter().any(|a| a == value) {
            Ok(())
        } else {
            Err(format!(
                "{} must be one of: {} (got: {})",
                field,
                allowed.join(", "),
                value
            ))
        }
    }
}

/// Validator: date must match a chrono format
pub fn date_format(
    format: &'static str,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        if value.is_empty() {
            return Ok(());
        }
        match chrono::NaiveDate::parse_from_str(value, format) {
            Ok(_) => Ok(()),
            Err(_) => Err(format!(
                "{} must use the format {} (got: {})",
                field, format, value
            )),
        }
    }
}

/// Validator: phone number, 6 to 15 digits with optional `+` and separators
pub fn phone() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| Regex::new(r"^\+?[0-9][0-9 ().-]{4,}$").unwrap());

        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }
        let digits = value.chars().filter(char::is_ascii_digit).count();
        if regex.is_match(value) && (6..=15).contains(&digits) {
            Ok(())
        } else {
            Err(format!("{} is not a valid phone number", field))
        }
    }
}
