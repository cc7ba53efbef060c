//! Field parsing shared by the intake services.
//!
//! Each helper takes the raw form value and either returns the cleaned
//! value or the `ValidationError` the caller should reject the whole
//! submission with.

use chrono::{NaiveDate, NaiveTime};

use super::errors::ValidationError;

pub fn require_identifier(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyIdentifier(field));
    }
    Ok(trimmed.to_string())
}

pub fn require_non_negative_quantity(quantity: i64) -> Result<i64, ValidationError> {
    if quantity < 0 {
        return Err(ValidationError::NegativeQuantity(quantity));
    }
    Ok(quantity)
}

pub fn require_non_negative_amount(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::NonFiniteAmount);
    }
    if amount < 0.0 {
        return Err(ValidationError::NegativeAmount(amount));
    }
    Ok(amount)
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Parse a wall clock time, with or without seconds
pub fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ValidationError::InvalidTime {
            field,
            value: value.to_string(),
        })
}
