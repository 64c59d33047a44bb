use crate::utils::error::{CalcError, Result};
use crate::utils::input::format_date;
use chrono::NaiveDate;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// A date format is usable when it formats a date that parses back to the same day.
pub fn validate_date_format(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;

    let sample = NaiveDate::from_ymd_opt(2024, 1, 31).ok_or_else(|| CalcError::ConfigError {
        message: "sample date out of range".to_string(),
    })?;

    let rendered = format_date(sample, format).map_err(|_| CalcError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: format.to_string(),
        reason: "Not a valid chrono format string".to_string(),
    })?;

    match NaiveDate::parse_from_str(&rendered, format) {
        Ok(parsed) if parsed == sample => Ok(()),
        _ => Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Format must include day, month and year".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("input.date_format", "%d/%m/%Y").is_ok());
        assert!(validate_non_empty_string("input.date_format", "   ").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("output.format", "json", &["text", "json"]).is_ok());
        assert!(validate_one_of("output.format", "xml", &["text", "json"]).is_err());
    }

    #[test]
    fn test_validate_date_format() {
        assert!(validate_date_format("input.date_format", "%d/%m/%Y").is_ok());
        assert!(validate_date_format("input.date_format", "%Y-%m-%d").is_ok());
        assert!(validate_date_format("input.date_format", "%m/%Y").is_err());
        assert!(validate_date_format("input.date_format", "%Q").is_err());
        assert!(validate_date_format("input.date_format", "%d/%m/%Y %H").is_err());
        assert!(validate_date_format("input.date_format", "").is_err());
    }
}
