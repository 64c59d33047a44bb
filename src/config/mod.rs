pub mod toml_config;

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hcg")]
#[command(about = "Interpreta o Beta hCG pela idade gestacional (3-16 semanas)")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Output format, overrides the configuration file
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// chrono format used to read dates, overrides the configuration file
    #[arg(long, global = true)]
    pub date_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Classify one Beta hCG value
    Classify {
        /// Beta hCG in mUI/mL
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// Last menstrual period date
        #[arg(long)]
        lmp: Option<String>,

        /// Evaluation date, defaults to today
        #[arg(long)]
        today: Option<String>,
    },
    /// Run the demonstration scenarios
    Examples {
        #[arg(long)]
        today: Option<String>,
    },
    /// Print the reference table
    Table,
    /// Classify every row of a CSV file with `measurement,lmp` columns
    Batch {
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV, defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        today: Option<String>,
    },
    /// Menu-driven session over stdin
    Interactive,
}
