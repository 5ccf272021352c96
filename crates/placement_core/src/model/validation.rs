//! Draft validation rules shared by every entity.
//!
//! # Responsibility
//! - Define the error reported when a draft breaks a model invariant.
//! - Provide small field checks reused by entity drafts.
//!
//! # Invariants
//! - Text fields are judged after trimming surrounding whitespace.
//! - Numeric ranges are inclusive on both ends and reject NaN.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("valid email regex"));

/// Invariant violation detected before a write reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field is blank after trim.
    EmptyField(&'static str),
    /// Numeric field outside its inclusive range.
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    /// Email does not look like `local@domain`.
    InvalidEmail(String),
    /// Date is not a `YYYY-MM-DD` calendar string.
    InvalidDate { field: &'static str, value: String },
    /// End date precedes start date.
    DateRangeReversed { start: String, end: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} is required"),
            Self::OutOfRange {
                field,
                min,
                max,
                value,
            } => write!(f, "{field} must be between {min} and {max}, got {value}"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::InvalidDate { field, value } => {
                write!(f, "{field} must be a YYYY-MM-DD date, got `{value}`")
            }
            Self::DateRangeReversed { start, end } => {
                write!(f, "end_date {end} is earlier than start_date {start}")
            }
        }
    }
}

impl Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub(crate) fn require_text(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_range(field: &'static str, value: f64, min: f64, max: f64) -> ValidationResult {
    // NaN fails both comparisons, so test the accepted interval explicitly.
    if value >= min && value <= max {
        return Ok(());
    }
    Err(ValidationError::OutOfRange {
        field,
        min,
        max,
        value,
    })
}

/// Rejects the nil id an unselected picker leaves in a draft.
pub(crate) fn require_id(field: &'static str, id: Uuid) -> ValidationResult {
    if id.is_nil() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> ValidationResult {
    require_text("email", value)?;
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(ValidationError::InvalidEmail(value.trim().to_string()));
    }
    Ok(())
}

pub(crate) fn require_iso_date(field: &'static str, value: &str) -> ValidationResult {
    require_text(field, value)?;
    if !ISO_DATE_RE.is_match(value.trim()) {
        return Err(ValidationError::InvalidDate {
            field,
            value: value.trim().to_string(),
        });
    }
    Ok(())
}

/// Trims optional text and collapses blank input to `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
