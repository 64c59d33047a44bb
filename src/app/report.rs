use crate::config::OutputFormat;
use crate::core::classifier::elapsed_weeks;
use crate::core::table::ReferenceTable;
use crate::domain::model::ClassificationResult;
use crate::utils::error::Result;
use crate::utils::input::format_date;
use chrono::NaiveDate;
use serde::Serialize;

/// One classification together with the inputs that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub measurement: f64,
    pub lmp: Option<NaiveDate>,
    pub evaluation_date: NaiveDate,
    pub estimated_weeks: Option<i64>,
    pub result: ClassificationResult,
    pub message: String,
}

impl Report {
    pub fn new(
        measurement: f64,
        lmp: Option<NaiveDate>,
        evaluation_date: NaiveDate,
        result: ClassificationResult,
    ) -> Self {
        let message = result.message();
        Self {
            measurement,
            lmp,
            evaluation_date,
            estimated_weeks: lmp.map(|date| elapsed_weeks(date, evaluation_date)),
            result,
            message,
        }
    }

    pub fn render(&self, format: OutputFormat, date_format: &str) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => {
                let mut lines = vec![
                    "--- RESULTADO ---".to_string(),
                    format!("Beta hCG: {:.1} mUI/mL", self.measurement),
                ];
                match self.lmp {
                    Some(lmp) => lines.push(format!(
                        "Última menstruação: {}",
                        format_date(lmp, date_format)?
                    )),
                    None => lines.push("Última menstruação: não informada".to_string()),
                }
                if let Some(weeks) = self.estimated_weeks {
                    lines.push(format!("Idade gestacional estimada: {} semanas", weeks));
                }
                lines.push(format!("Interpretação: {}", self.message));
                Ok(lines.join("\n"))
            }
        }
    }
}

pub fn render_table(table: &ReferenceTable<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(table.rows())?),
        OutputFormat::Text => {
            let mut lines = vec!["Semana | Beta hCG esperado (mUI/mL)".to_string()];
            lines.extend(table.rows().iter().map(|row| {
                format!("{:>6} | {:.0} - {:.0}", row.week, row.lower, row.upper)
            }));
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::classify;
    use crate::utils::input::DEFAULT_DATE_FORMAT;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_text_report() {
        let today = date(2024, 6, 15);
        let lmp = Some(date(2024, 5, 11));
        let report = Report::new(2000.0, lmp, today, classify(2000.0, lmp, today));
        let text = report.render(OutputFormat::Text, DEFAULT_DATE_FORMAT).unwrap();

        assert!(text.contains("Beta hCG: 2000.0 mUI/mL"));
        assert!(text.contains("Última menstruação: 11/05/2024"));
        assert!(text.contains("Idade gestacional estimada: 5 semanas"));
        assert!(text.contains("compatível"));
    }

    #[test]
    fn test_text_report_without_lmp() {
        let today = date(2024, 6, 15);
        let report = Report::new(100.0, None, today, classify(100.0, None, today));
        let text = report.render(OutputFormat::Text, DEFAULT_DATE_FORMAT).unwrap();

        assert!(text.contains("não informada"));
        assert!(!text.contains("Idade gestacional estimada"));
    }

    #[test]
    fn test_json_report() {
        let today = date(2024, 6, 15);
        let lmp = Some(date(2024, 5, 4));
        let report = Report::new(500.0, lmp, today, classify(500.0, lmp, today));
        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json, DEFAULT_DATE_FORMAT).unwrap())
                .unwrap();

        assert_eq!(json["lmp"], "2024-05-04");
        assert_eq!(json["estimated_weeks"], 6);
        assert_eq!(json["result"]["category"], "below_expected");
        assert!(json["message"].as_str().unwrap().contains("1080-56500"));
        assert_eq!(json["result"]["message"], json["message"]);
    }

    #[test]
    fn test_text_report_with_time_in_date_format_is_an_error() {
        let today = date(2024, 6, 15);
        let lmp = Some(date(2024, 5, 11));
        let report = Report::new(2000.0, lmp, today, classify(2000.0, lmp, today));

        let result = report.render(OutputFormat::Text, "%d/%m/%Y %H");
        assert!(matches!(
            result,
            Err(crate::utils::error::CalcError::DateFormatError { .. })
        ));
    }

    #[test]
    fn test_render_table() {
        let text = render_table(&ReferenceTable::standard(), OutputFormat::Text).unwrap();
        assert_eq!(text.lines().count(), 15);
        assert!(text.contains("     6 | 1080 - 56500"));

        let json: serde_json::Value = serde_json::from_str(
            &render_table(&ReferenceTable::standard(), OutputFormat::Json).unwrap(),
        )
        .unwrap();
        assert_eq!(json.as_array().unwrap().len(), 14);
        assert_eq!(json[0]["week"], 3);
    }
}
