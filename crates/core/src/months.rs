//! Month key helpers.
//!
//! Budget periods are identified by `YYYY-MM` strings. A transaction's month
//! key is always the truncation of its date, never authored independently.

use chrono::{Datelike, NaiveDate, Utc};

use crate::errors::{Result, ValidationError};

/// Derives the `YYYY-MM` month key from a calendar date.
pub fn month_key_of(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// The month key for today's date (UTC).
pub fn current_month() -> String {
    month_key_of(Utc::now().date_naive())
}

/// Checks that a month key is a well-formed `YYYY-MM` string.
pub fn is_valid_month_key(month: &str) -> bool {
    let bytes = month.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return false;
    }
    if !month[..4].chars().all(|c| c.is_ascii_digit())
        || !month[5..].chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }
    matches!(month[5..].parse::<u32>(), Ok(m) if (1..=12).contains(&m))
}

/// Validates a month key, returning it untouched on success.
pub fn validate_month_key(month: &str) -> Result<&str> {
    if is_valid_month_key(month) {
        Ok(month)
    } else {
        Err(ValidationError::InvalidMonthKey(month.to_string()).into())
    }
}

/// The month key immediately before the given one.
pub fn previous_month(month: &str) -> Result<String> {
    validate_month_key(month)?;
    let year: i32 = month[..4].parse().expect("validated year digits");
    let m: u32 = month[5..].parse().expect("validated month digits");
    Ok(if m == 1 {
        format!("{:04}-12", year - 1)
    } else {
        format!("{:04}-{:02}", year, m - 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_truncates_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(month_key_of(date), "2024-06");
    }

    #[test]
    fn validates_well_formed_keys() {
        assert!(is_valid_month_key("2024-01"));
        assert!(is_valid_month_key("1999-12"));
        assert!(!is_valid_month_key("2024-13"));
        assert!(!is_valid_month_key("2024-00"));
        assert!(!is_valid_month_key("2024-1"));
        assert!(!is_valid_month_key("24-01"));
        assert!(!is_valid_month_key("2024/01"));
    }

    #[test]
    fn previous_month_handles_january() {
        assert_eq!(previous_month("2024-01").unwrap(), "2023-12");
        assert_eq!(previous_month("2024-07").unwrap(), "2024-06");
        assert!(previous_month("garbage").is_err());
    }
}
