// src/web/validation.rs

//! Small, composable validation helpers applied at the request boundary,
//! before any business logic runs. Each returns a `Validation` error naming
//! the offending field.

use crate::errors::{AppError, Result};

/// Minimal syntactic email check: one `@`, non-empty local part, and a
/// domain containing a dot, with no whitespace anywhere.
pub fn require_valid_email(email: &str) -> Result<()> {
  let mut parts = email.split('@');
  let valid = match (parts.next(), parts.next(), parts.next()) {
    (Some(local), Some(domain), None) => {
      !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
    }
    _ => false,
  };
  if valid {
    Ok(())
  } else {
    Err(AppError::Validation("A valid email address is required".to_string()))
  }
}

pub fn require_min_length(field: &str, value: &str, min: usize) -> Result<()> {
  if value.len() < min {
    return Err(AppError::Validation(format!(
      "{} must be at least {} characters long",
      field, min
    )));
  }
  Ok(())
}

pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(AppError::Validation(format!("{} must not be empty", field)));
  }
  Ok(())
}

pub fn require_positive_price(field: &str, value: f64) -> Result<()> {
  if !value.is_finite() || value <= 0.0 {
    return Err(AppError::Validation(format!("{} must be a positive number", field)));
  }
  Ok(())
}

pub fn require_non_negative_price(field: &str, value: f64) -> Result<()> {
  if !value.is_finite() || value < 0.0 {
    return Err(AppError::Validation(format!("{} must not be negative", field)));
  }
  Ok(())
}

pub fn require_non_negative_quantity(field: &str, value: i32) -> Result<()> {
  if value < 0 {
    return Err(AppError::Validation(format!("{} must not be negative", field)));
  }
  Ok(())
}

pub fn require_at_least_one(field: &str, value: i32) -> Result<()> {
  if value < 1 {
    return Err(AppError::Validation(format!("{} must be at least 1", field)));
  }
  Ok(())
}
