use crate::utils::error::{CalcError, Result};
use chrono::NaiveDate;
use std::fmt::Write;

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

pub fn parse_date(text: &str, format: &str) -> Result<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, format).map_err(|_| CalcError::DateParseError {
        input: text.to_string(),
        format: format.to_string(),
    })
}

/// Renders `date` without panicking on formats that need more than a date (e.g. `%H`).
pub fn format_date(date: NaiveDate, format: &str) -> Result<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", date.format(format)).map_err(|_| CalcError::DateFormatError {
        format: format.to_string(),
    })?;
    Ok(rendered)
}

/// Empty text means "not informed".
pub fn parse_optional_date(text: &str, format: &str) -> Result<Option<NaiveDate>> {
    if text.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(text, format).map(Some)
    }
}

/// Accepts a decimal comma as well, as typed on pt-BR keyboards.
pub fn parse_measurement(text: &str) -> Result<f64> {
    let text = text.trim();
    text.replace(',', ".")
        .parse::<f64>()
        .map_err(|_| CalcError::MeasurementParseError {
            input: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_default_format() {
        let date = parse_date("05/03/2024", DEFAULT_DATE_FORMAT).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(
            parse_date(" 29/02/2024 \n", DEFAULT_DATE_FORMAT).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_bad_input() {
        assert!(parse_date("31/02/2024", DEFAULT_DATE_FORMAT).is_err());
        assert!(parse_date("2024-03-05", DEFAULT_DATE_FORMAT).is_err());
        match parse_date("ontem", DEFAULT_DATE_FORMAT) {
            Err(CalcError::DateParseError { input, format }) => {
                assert_eq!(input, "ontem");
                assert_eq!(format, DEFAULT_DATE_FORMAT);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        assert_eq!(format_date(date, DEFAULT_DATE_FORMAT).unwrap(), "11/05/2024");
        assert!(matches!(
            format_date(date, "%d/%m/%Y %H"),
            Err(CalcError::DateFormatError { .. })
        ));
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date("  ", DEFAULT_DATE_FORMAT).unwrap(), None);
        assert!(parse_optional_date("01/01/2024", DEFAULT_DATE_FORMAT)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement("1250.5").unwrap(), 1250.5);
        assert_eq!(parse_measurement("1250,5").unwrap(), 1250.5);
        assert_eq!(parse_measurement(" -1 ").unwrap(), -1.0);
        assert!(parse_measurement("abc").is_err());
        assert!(parse_measurement("").is_err());
    }
}
