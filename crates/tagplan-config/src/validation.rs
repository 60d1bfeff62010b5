use crate::types::Settings;
use thiserror::Error;

/// Largest batch the tag lookup API accepts
pub const MAX_BATCH_SIZE: usize = 100;

/// Settings validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid region: '{0}'. Expected a code like us-west-2")]
    InvalidRegion(String),

    #[error("View name must not be empty")]
    EmptyView,

    #[error("View name contains invalid characters")]
    InvalidView,

    #[error("Batch size must be between 1 and 100, got {0}")]
    BatchSize(usize),

    #[error("Requests per second must be at least 1")]
    RequestsPerSecond,
}

/// Validate a region code
///
/// Region codes must:
/// - Have at least three `-`-separated parts
/// - Start with a two-letter lowercase prefix
/// - End with a number
/// - Contain only lowercase letters in the middle parts
pub fn validate_region(region: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidRegion(region.to_string());
    let parts: Vec<&str> = region.split('-').collect();
    if parts.len() < 3 {
        return Err(invalid());
    }

    let (prefix, rest) = (parts[0], &parts[1..]);
    if prefix.len() != 2 || !prefix.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(invalid());
    }

    let (number, middle) = rest.split_last().ok_or_else(invalid)?;
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if middle
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_lowercase()))
    {
        return Err(invalid());
    }

    Ok(())
}

/// Validate a view name: non-empty, no control characters
pub fn validate_view_name(view: &str) -> Result<(), ValidationError> {
    if view.trim().is_empty() {
        return Err(ValidationError::EmptyView);
    }
    if view.chars().any(|c| c.is_control()) {
        return Err(ValidationError::InvalidView);
    }
    Ok(())
}

pub fn validate_batch_size(batch_size: usize) -> Result<(), ValidationError> {
    if (1..=MAX_BATCH_SIZE).contains(&batch_size) {
        Ok(())
    } else {
        Err(ValidationError::BatchSize(batch_size))
    }
}

pub fn validate_requests_per_second(rps: u32) -> Result<(), ValidationError> {
    if rps == 0 {
        return Err(ValidationError::RequestsPerSecond);
    }
    Ok(())
}

/// Validate every field of `settings`, stopping at the first problem
pub fn validate_settings(settings: &Settings) -> Result<(), ValidationError> {
    validate_region(&settings.region)?;
    validate_view_name(&settings.view)?;
    validate_batch_size(settings.batch_size)?;
    validate_requests_per_second(settings.requests_per_second)
}
