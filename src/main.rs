use clap::Parser;
use hcg_classifier::app::commands::{self, Context};
use hcg_classifier::utils::error::ErrorSeverity;
use hcg_classifier::utils::{logger, validation::Validate};
use hcg_classifier::{CalcError, CalculatorConfig, CliConfig, ReferenceTable, SystemClock};

fn load_config(cli: &CliConfig) -> Result<CalculatorConfig, CalcError> {
    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::default(),
    };
    config.apply_overrides(cli.format, cli.date_format.clone());
    config.validate()?;
    Ok(config)
}

fn exit_with(e: &CalcError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, None);
            tracing::error!("❌ Configuration validation failed: {}", e);
            exit_with(&e);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::debug!("CLI config: {:?}", cli);
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = ReferenceTable::standard().validate() {
        exit_with(&e);
    }
    tracing::debug!("Reference table validated");

    let clock = SystemClock;
    let ctx = Context::new(&config, &clock);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = commands::run(&cli.command, &ctx, &mut out) {
        exit_with(&e);
    }
}
