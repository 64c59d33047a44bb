use crate::app::batch::classify_csv;
use crate::app::demo::{basic_scenarios, weekly_scenarios, Scenario};
use crate::app::report::{render_table, Report};
use crate::config::toml_config::CalculatorConfig;
use crate::config::OutputFormat;
use crate::core::classifier::classify;
use crate::core::table::ReferenceTable;
use crate::domain::model::Category;
use crate::domain::ports::Clock;
use crate::utils::error::Result;
use crate::utils::input::{format_date, parse_date, parse_measurement, parse_optional_date};
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

#[cfg(feature = "cli")]
use crate::config::Command;

/// Settings and clock shared by every command.
pub struct Context<'a> {
    pub config: &'a CalculatorConfig,
    pub clock: &'a dyn Clock,
}

impl<'a> Context<'a> {
    pub fn new(config: &'a CalculatorConfig, clock: &'a dyn Clock) -> Self {
        Self { config, clock }
    }

    pub fn today(&self, override_text: Option<&str>) -> Result<NaiveDate> {
        match override_text {
            Some(text) => parse_date(text, self.config.date_format()),
            None => Ok(self.clock.today()),
        }
    }

    fn format(&self) -> OutputFormat {
        self.config.output_format()
    }
}

pub fn classify_text(
    ctx: &Context<'_>,
    value: &str,
    lmp: Option<&str>,
    today: NaiveDate,
) -> Result<Report> {
    let measurement = parse_measurement(value)?;
    let lmp = match lmp {
        Some(text) => parse_optional_date(text, ctx.config.date_format())?,
        None => None,
    };

    let result = classify(measurement, lmp, today);
    tracing::info!(
        "Classified {:.1} mUI/mL as {}",
        measurement,
        result.category()
    );
    Ok(Report::new(measurement, lmp, today, result))
}

pub fn write_report<W: Write>(out: &mut W, ctx: &Context<'_>, report: &Report) -> Result<()> {
    writeln!(
        out,
        "{}",
        report.render(ctx.format(), ctx.config.date_format())?
    )?;
    Ok(())
}

fn scenario_reports(scenarios: &[Scenario], today: NaiveDate) -> Vec<Report> {
    scenarios
        .iter()
        .map(|s| Report::new(s.measurement, Some(s.lmp(today)), today, s.run(today)))
        .collect()
}

pub fn write_basic_examples<W: Write>(
    out: &mut W,
    ctx: &Context<'_>,
    today: NaiveDate,
) -> Result<()> {
    let scenarios = basic_scenarios();
    let reports = scenario_reports(&scenarios, today);

    if ctx.format() == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
        return Ok(());
    }

    writeln!(out, "=== EXEMPLOS BÁSICOS ===")?;
    for (scenario, report) in scenarios.iter().zip(&reports) {
        writeln!(out, "Categoria: {}", scenario.label)?;
        writeln!(out, "  Beta hCG: {:.1} mUI/mL", scenario.measurement)?;
        writeln!(
            out,
            "  DUM: {} ({} semanas atrás)",
            format_date(scenario.lmp(today), ctx.config.date_format())?,
            scenario.weeks_ago
        )?;
        writeln!(out, "  Resultado: {}", report.message)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_weekly_examples<W: Write>(
    out: &mut W,
    ctx: &Context<'_>,
    today: NaiveDate,
) -> Result<()> {
    let scenarios = weekly_scenarios();
    let reports = scenario_reports(&scenarios, today);

    if ctx.format() == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
        return Ok(());
    }

    writeln!(out, "=== COMPATIBILIDADE PARA TODAS AS SEMANAS ===")?;
    for (scenario, report) in scenarios.iter().zip(&reports) {
        let verdict = if report.result.category() == Category::CompatibleRange {
            "✓ Compatível"
        } else {
            "✗ Problema"
        };
        writeln!(
            out,
            "{} ({:.0} mUI/mL): {}",
            scenario.label, scenario.measurement, verdict
        )?;
    }
    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, ctx: &Context<'_>) -> Result<()> {
    writeln!(
        out,
        "{}",
        render_table(&ReferenceTable::standard(), ctx.format())?
    )?;
    Ok(())
}

/// Reads `input` and writes the classified rows to `output`, or to `out` when no path is given.
pub fn run_batch<W: Write>(
    out: &mut W,
    ctx: &Context<'_>,
    input: &Path,
    output: Option<&Path>,
    today: NaiveDate,
) -> Result<()> {
    tracing::info!("Reading batch input from {}", input.display());
    let reader = BufReader::new(File::open(input)?);
    let date_format = ctx.config.date_format();

    let summary = match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            let summary = classify_csv(reader, writer, date_format, today)?;
            tracing::info!("Results saved to {}", path.display());
            summary
        }
        None => classify_csv(reader, &mut *out, date_format, today)?,
    };

    tracing::info!(
        "Classified {} rows ({} rejected)",
        summary.rows,
        summary.rejected
    );
    for (category, count) in &summary.by_category {
        tracing::debug!("  {}: {}", category, count);
    }
    Ok(())
}

#[cfg(feature = "cli")]
pub fn run<W: Write>(command: &Command, ctx: &Context<'_>, out: &mut W) -> Result<()> {
    match command {
        Command::Classify { value, lmp, today } => {
            let today = ctx.today(today.as_deref())?;
            let report = classify_text(ctx, value, lmp.as_deref(), today)?;
            write_report(out, ctx, &report)
        }
        Command::Examples { today } => {
            let today = ctx.today(today.as_deref())?;
            write_basic_examples(out, ctx, today)?;
            write_weekly_examples(out, ctx, today)
        }
        Command::Table => write_table(out, ctx),
        Command::Batch {
            input,
            output,
            today,
        } => {
            let today = ctx.today(today.as_deref())?;
            run_batch(out, ctx, input, output.as_deref(), today)
        }
        Command::Interactive => {
            let stdin = std::io::stdin();
            crate::app::interactive::Session::new(stdin.lock(), out, ctx).run()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn test_today_override() {
        let config = CalculatorConfig::default();
        let clock = clock();
        let ctx = Context::new(&config, &clock);

        assert_eq!(ctx.today(None).unwrap(), clock.0);
        assert_eq!(
            ctx.today(Some("01/06/2024")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(ctx.today(Some("2024-06-01")).is_err());
    }

    #[test]
    fn test_classify_text_propagates_input_errors() {
        let config = CalculatorConfig::default();
        let clock = clock();
        let ctx = Context::new(&config, &clock);

        assert!(classify_text(&ctx, "abc", Some("01/05/2024"), clock.0).is_err());
        assert!(classify_text(&ctx, "100", Some("32/05/2024"), clock.0).is_err());

        let report = classify_text(&ctx, "100", None, clock.0).unwrap();
        assert_eq!(report.result.category(), Category::MissingDate);
    }

    #[test]
    fn test_basic_examples_text() {
        let config = CalculatorConfig::default();
        let clock = clock();
        let ctx = Context::new(&config, &clock);
        let mut out = Vec::new();

        write_basic_examples(&mut out, &ctx, clock.0).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("=== EXEMPLOS BÁSICOS ==="));
        assert!(text.contains("DUM: 04/05/2024 (6 semanas atrás)"));
        assert!(text.contains("gestação gemelar"));
    }

    #[test]
    fn test_unvalidated_date_format_does_not_panic() {
        let config =
            CalculatorConfig::from_toml_str("[input]\ndate_format = \"%d/%m/%Y %H\"\n").unwrap();
        let clock = clock();
        let ctx = Context::new(&config, &clock);
        let mut out = Vec::new();

        let report = classify_text(&ctx, "2000", Some("11/05/2024 10"), clock.0).unwrap();
        assert!(write_report(&mut out, &ctx, &report).is_err());
        assert!(write_basic_examples(&mut out, &ctx, clock.0).is_err());
    }

    #[test]
    fn test_weekly_examples_all_compatible() {
        let config = CalculatorConfig::default();
        let clock = clock();
        let ctx = Context::new(&config, &clock);
        let mut out = Vec::new();

        write_weekly_examples(&mut out, &ctx, clock.0).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("✓ Compatível").count(), 14);
        assert!(!text.contains("✗"));
    }

    #[test]
    fn test_json_examples() {
        let mut config = CalculatorConfig::default();
        config.apply_overrides(Some(OutputFormat::Json), None);
        let clock = clock();
        let ctx = Context::new(&config, &clock);
        let mut out = Vec::new();

        write_basic_examples(&mut out, &ctx, clock.0).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 4);
        assert_eq!(json[1]["result"]["category"], "compatible_range");
    }
}
