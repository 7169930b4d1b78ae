use std::time::Duration;

use crate::error::{AppError, AppResult, ValidationError};

use super::types::{PositiveU64, PositiveUsize};

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(crate) fn parse_threshold(s: &str) -> Result<f64, ValidationError> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|err| ValidationError::InvalidFloat { source: err })?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::ThresholdOutOfRange { value });
    }
    Ok(value)
}

/// Parses durations like `500ms`, `10s`, `2m`, or `1h`. A bare number is
/// treated as seconds.
pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim().to_ascii_lowercase();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_end = value
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(value.len());
    let (number_str, unit) = value.split_at(digits_end);
    if number_str.is_empty() {
        return Err(ValidationError::InvalidDurationFormat {
            value: s.to_owned(),
        });
    }
    let amount: u64 = number_str
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: s.to_owned(),
            source: err,
        })?;
    if amount == 0 {
        return Err(ValidationError::DurationZero);
    }

    match unit {
        "ms" => Ok(Duration::from_millis(amount)),
        "" | "s" => Ok(Duration::from_secs(amount)),
        "m" => amount
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow),
        "h" => amount
            .checked_mul(3600)
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow),
        _ => Err(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        }),
    }
}
