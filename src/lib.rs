pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::{toml_config::CalculatorConfig, OutputFormat};
pub use crate::core::classifier::{classify, classify_with_table, elapsed_weeks};
pub use crate::core::table::ReferenceTable;
pub use crate::domain::model::{Category, ClassificationResult, ReferenceRow, REFERENCE_TABLE};
pub use crate::domain::ports::{Clock, FixedClock, SystemClock};
pub use crate::utils::error::{CalcError, Result};
