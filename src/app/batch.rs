use crate::core::classifier::{classify, elapsed_weeks};
use crate::utils::error::Result;
use crate::utils::input::{parse_measurement, parse_optional_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Category written for rows whose text could not be read.
pub const INPUT_ERROR: &str = "input_error";

#[derive(Debug, Deserialize)]
struct BatchRecord {
    measurement: String,
    #[serde(default)]
    lmp: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchOutcome {
    line: u64,
    measurement: String,
    lmp: String,
    elapsed_weeks: Option<i64>,
    category: String,
    message: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchSummary {
    pub rows: usize,
    pub rejected: usize,
    pub by_category: BTreeMap<String, usize>,
}

/// Classifies each `measurement,lmp` row of `reader` and writes one CSV row per input row.
/// Rows with unreadable values are kept in the output under [`INPUT_ERROR`].
pub fn classify_csv<R: Read, W: Write>(
    reader: R,
    writer: W,
    date_format: &str,
    today: NaiveDate,
) -> Result<BatchSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();

    for record in csv_reader.deserialize::<BatchRecord>() {
        let record = record?;
        // header is line 1
        let line = summary.rows as u64 + 2;
        summary.rows += 1;

        let lmp_text = record.lmp.unwrap_or_default();
        let parsed = parse_measurement(&record.measurement)
            .and_then(|value| Ok((value, parse_optional_date(&lmp_text, date_format)?)));

        let outcome = match parsed {
            Ok((measurement, lmp)) => {
                let result = classify(measurement, lmp, today);
                tracing::debug!("line {}: {}", line, result.category());
                BatchOutcome {
                    line,
                    measurement: record.measurement,
                    lmp: lmp_text,
                    elapsed_weeks: lmp.map(|date| elapsed_weeks(date, today)),
                    category: result.category().to_string(),
                    message: result.message(),
                }
            }
            Err(e) => {
                tracing::warn!("line {}: {}", line, e);
                summary.rejected += 1;
                BatchOutcome {
                    line,
                    measurement: record.measurement,
                    lmp: lmp_text,
                    elapsed_weeks: None,
                    category: INPUT_ERROR.to_string(),
                    message: e.user_friendly_message(),
                }
            }
        };

        *summary
            .by_category
            .entry(outcome.category.clone())
            .or_insert(0) += 1;
        csv_writer.serialize(&outcome)?;
    }

    csv_writer.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::input::DEFAULT_DATE_FORMAT;

    #[test]
    fn test_classify_csv_rows() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let input = "measurement,lmp\n2000,11/05/2024\n100,\nabc,11/05/2024\n20,25/05/2024\n";
        let mut output = Vec::new();

        let summary =
            classify_csv(input.as_bytes(), &mut output, DEFAULT_DATE_FORMAT, today).unwrap();

        assert_eq!(summary.rows, 4);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.by_category.get("compatible_range"), Some(&1));
        assert_eq!(summary.by_category.get("missing_date"), Some(&1));
        assert_eq!(summary.by_category.get("negative_early"), Some(&1));
        assert_eq!(summary.by_category.get(INPUT_ERROR), Some(&1));

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "line,measurement,lmp,elapsed_weeks,category,message"
        );
        assert!(lines[1].starts_with("2,2000,11/05/2024,5,compatible_range,"));
        assert!(lines[2].starts_with("3,100,,,missing_date,"));
        assert!(lines[3].starts_with("4,abc,11/05/2024,,input_error,"));
    }

    #[test]
    fn test_missing_lmp_column() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mut output = Vec::new();

        let summary =
            classify_csv("measurement\n50\n".as_bytes(), &mut output, DEFAULT_DATE_FORMAT, today)
                .unwrap();

        assert_eq!(summary.by_category.get("missing_date"), Some(&1));
    }
}
