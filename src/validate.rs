//! Field validation for new photos and testimonials.
//!
//! Each required-field check is its own predicate with its own error
//! variant. Text fields are trimmed before the emptiness check and the
//! trimmed value is what callers store.

use crate::types::{Rating, RatingOutOfRange};
use crate::upload::{PendingFile, StagedUpload};
use chrono::NaiveDate;
use thiserror::Error;

/// Format of the date input the review form submits.
pub const REVIEW_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("no image file is staged")]
    MissingFile,
    #[error("client name is required")]
    MissingName,
    #[error("review text is required")]
    MissingText,
    #[error("review url is required")]
    MissingUrl,
    #[error("review date is required")]
    MissingDate,
    #[error("review date {0:?} is not a YYYY-MM-DD date")]
    InvalidDate(String),
    #[error(transparent)]
    Rating(#[from] RatingOutOfRange),
}

fn required(value: &str, missing: ValidationError) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(missing)
    } else {
        Ok(trimmed)
    }
}

pub fn require_title(title: &str) -> Result<&str, ValidationError> {
    required(title, ValidationError::MissingTitle)
}

pub fn require_name(name: &str) -> Result<&str, ValidationError> {
    required(name, ValidationError::MissingName)
}

pub fn require_text(text: &str) -> Result<&str, ValidationError> {
    required(text, ValidationError::MissingText)
}

pub fn require_url(url: &str) -> Result<&str, ValidationError> {
    required(url, ValidationError::MissingUrl)
}

pub fn require_date(date: &str) -> Result<&str, ValidationError> {
    required(date, ValidationError::MissingDate)
}

pub fn require_staged(slot: &StagedUpload) -> Result<&PendingFile, ValidationError> {
    slot.pending().ok_or(ValidationError::MissingFile)
}

pub fn require_rating(value: i64) -> Result<Rating, ValidationError> {
    Ok(Rating::new(value)?)
}

/// Parse a non-empty `YYYY-MM-DD` date.
pub fn parse_review_date(date: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date, REVIEW_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}
