//! Beta hCG interpretation against the gestational-week reference table.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. no last-menstrual-period date -> `MissingDate`
//! 2. negative measurement -> `InvalidMeasurement`
//! 3. measurement below 25 mUI/mL -> `NegativeEarly` (under 4 weeks) or `NegativeLate`
//! 4. elapsed weeks outside 3-16 -> `OutOfRange`
//! 5. no row for the elapsed week -> `NoReferenceRow`
//! 6. inclusive comparison against the row bounds -> `CompatibleRange`, `BelowExpected`
//!    or `AboveExpected`
//!
//! The evaluation date is always supplied by the caller.

use crate::core::table::ReferenceTable;
use crate::domain::model::{
    ClassificationResult, EARLY_NEGATIVE_WEEKS, FIRST_WEEK, LAST_WEEK, NEGATIVE_THRESHOLD,
};
use chrono::NaiveDate;

/// Whole weeks from `reference` to `evaluation`, floor-divided from whole days.
/// Negative when `reference` lies in the future.
pub fn elapsed_weeks(reference: NaiveDate, evaluation: NaiveDate) -> i64 {
    (evaluation - reference).num_days().div_euclid(7)
}

pub fn classify(
    measurement: f64,
    reference_date: Option<NaiveDate>,
    evaluation_date: NaiveDate,
) -> ClassificationResult {
    classify_with_table(
        &ReferenceTable::standard(),
        measurement,
        reference_date,
        evaluation_date,
    )
}

pub fn classify_with_table(
    table: &ReferenceTable<'_>,
    measurement: f64,
    reference_date: Option<NaiveDate>,
    evaluation_date: NaiveDate,
) -> ClassificationResult {
    let Some(reference_date) = reference_date else {
        return ClassificationResult::MissingDate;
    };

    if measurement < 0.0 {
        return ClassificationResult::InvalidMeasurement { measurement };
    }

    let elapsed_weeks = elapsed_weeks(reference_date, evaluation_date);

    if measurement < NEGATIVE_THRESHOLD {
        return if elapsed_weeks < EARLY_NEGATIVE_WEEKS {
            ClassificationResult::NegativeEarly {
                measurement,
                elapsed_weeks,
            }
        } else {
            ClassificationResult::NegativeLate {
                measurement,
                elapsed_weeks,
            }
        };
    }

    if !(FIRST_WEEK..=LAST_WEEK).contains(&elapsed_weeks) {
        return ClassificationResult::OutOfRange {
            measurement,
            elapsed_weeks,
        };
    }

    let Some(row) = table.lookup(elapsed_weeks) else {
        return ClassificationResult::NoReferenceRow {
            measurement,
            elapsed_weeks,
        };
    };

    let (lower, upper) = (row.lower, row.upper);
    if row.contains(measurement) {
        ClassificationResult::CompatibleRange {
            measurement,
            elapsed_weeks,
            lower,
            upper,
        }
    } else if measurement < lower {
        ClassificationResult::BelowExpected {
            measurement,
            elapsed_weeks,
            lower,
            upper,
        }
    } else {
        // Also reached by NaN, which compares false against both bounds.
        ClassificationResult::AboveExpected {
            measurement,
            elapsed_weeks,
            lower,
            upper,
        }
    }
}
