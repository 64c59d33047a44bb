use crate::core::classifier::classify;
use crate::domain::model::{ClassificationResult, FIRST_WEEK, LAST_WEEK};
use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub label: String,
    pub measurement: f64,
    pub weeks_ago: i64,
}

impl Scenario {
    fn new(label: impl Into<String>, measurement: f64, weeks_ago: i64) -> Self {
        Self {
            label: label.into(),
            measurement,
            weeks_ago,
        }
    }

    pub fn lmp(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::weeks(self.weeks_ago)
    }

    pub fn run(&self, today: NaiveDate) -> ClassificationResult {
        classify(self.measurement, Some(self.lmp(today)), today)
    }
}

pub fn basic_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("Resultado negativo", 20.0, 6),
        Scenario::new("Resultado compatível", 2000.0, 5),
        Scenario::new("Resultado abaixo do esperado", 500.0, 6),
        Scenario::new("Resultado acima do esperado", 50000.0, 5),
    ]
}

/// A value inside the expected interval for `week`.
pub fn typical_value(week: i64) -> f64 {
    match week {
        3 => 30.0,
        4 => 200.0,
        5 => 2000.0,
        6 => 20000.0,
        7 | 8 => 100000.0,
        9..=12 => 200000.0,
        13..=16 => 150000.0,
        _ => 100000.0,
    }
}

pub fn weekly_scenarios() -> Vec<Scenario> {
    (FIRST_WEEK..=LAST_WEEK)
        .map(|week| Scenario::new(format!("{} semanas", week), typical_value(week), week))
        .collect()
}
