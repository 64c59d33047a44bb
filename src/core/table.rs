use crate::domain::model::{ReferenceRow, FIRST_WEEK, LAST_WEEK, REFERENCE_TABLE};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::Validate;

/// Read-only view over week-indexed reference rows.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceTable<'a> {
    rows: &'a [ReferenceRow],
}

impl ReferenceTable<'static> {
    pub fn standard() -> Self {
        Self::new(&REFERENCE_TABLE)
    }
}

impl Default for ReferenceTable<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> ReferenceTable<'a> {
    pub fn new(rows: &'a [ReferenceRow]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &'a [ReferenceRow] {
        self.rows
    }

    /// Exact week match. Rows are expected to be sorted and contiguous, so the row is
    /// found by offset first; tables that break that shape fall back to a scan.
    pub fn lookup(&self, week: i64) -> Option<&'a ReferenceRow> {
        let first = self.rows.first()?.week;
        let direct = week
            .checked_sub(first)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|idx| self.rows.get(idx))
            .filter(|row| row.week == week);

        direct.or_else(|| self.rows.iter().find(|row| row.week == week))
    }
}

impl Validate for ReferenceTable<'_> {
    fn validate(&self) -> Result<()> {
        let expected_len = (LAST_WEEK - FIRST_WEEK + 1) as usize;
        if self.rows.len() != expected_len {
            return Err(CalcError::ReferenceTableError {
                message: format!(
                    "expected {} rows for weeks {}-{}, found {}",
                    expected_len,
                    FIRST_WEEK,
                    LAST_WEEK,
                    self.rows.len()
                ),
            });
        }

        for (expected_week, row) in (FIRST_WEEK..=LAST_WEEK).zip(self.rows) {
            if row.week != expected_week {
                return Err(CalcError::ReferenceTableError {
                    message: format!("expected week {}, found week {}", expected_week, row.week),
                });
            }
            if !(row.lower >= 0.0 && row.lower <= row.upper) {
                return Err(CalcError::ReferenceTableError {
                    message: format!(
                        "week {} has invalid bounds {}-{}",
                        row.week, row.lower, row.upper
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_valid() {
        let table = ReferenceTable::standard();
        assert!(table.validate().is_ok());
        assert_eq!(table.rows().len(), 14);
    }

    #[test]
    fn test_lookup_every_week() {
        let table = ReferenceTable::standard();
        for week in FIRST_WEEK..=LAST_WEEK {
            assert_eq!(table.lookup(week).map(|row| row.week), Some(week));
        }
        assert!(table.lookup(2).is_none());
        assert!(table.lookup(17).is_none());
        assert!(table.lookup(-5).is_none());
        assert!(table.lookup(i64::MIN).is_none());
    }

    #[test]
    fn test_lookup_values() {
        let table = ReferenceTable::standard();
        let row = table.lookup(6).unwrap();
        assert_eq!((row.lower, row.upper), (1080.0, 56500.0));
        let row = table.lookup(13).unwrap();
        assert_eq!((row.lower, row.upper), (13300.0, 254000.0));
    }

    #[test]
    fn test_lookup_falls_back_to_scan_on_gaps() {
        let rows = [
            ReferenceRow::new(3, 5.0, 50.0),
            ReferenceRow::new(5, 18.0, 7340.0),
        ];
        let table = ReferenceTable::new(&rows);
        assert_eq!(table.lookup(5).map(|row| row.week), Some(5));
        assert!(table.lookup(4).is_none());
        assert!(ReferenceTable::new(&[]).lookup(3).is_none());
    }

    #[test]
    fn test_validate_rejects_gaps_and_inverted_bounds() {
        let mut rows = REFERENCE_TABLE;
        rows[4].week = 99;
        assert!(ReferenceTable::new(&rows).validate().is_err());

        let mut rows = REFERENCE_TABLE;
        rows[0] = ReferenceRow::new(3, 60.0, 50.0);
        assert!(ReferenceTable::new(&rows).validate().is_err());

        assert!(ReferenceTable::new(&REFERENCE_TABLE[..10]).validate().is_err());
    }
}
