use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid date '{input}': expected format {format}")]
    DateParseError { input: String, format: String },

    #[error("Date format '{format}' cannot render a calendar date")]
    DateFormatError { format: String },

    #[error("Invalid Beta hCG value '{input}'")]
    MeasurementParseError { input: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Reference table error: {message}")]
    ReferenceTableError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::DateParseError { .. } | CalcError::MeasurementParseError { .. } => {
                ErrorCategory::Input
            }
            CalcError::ConfigError { .. }
            | CalcError::DateFormatError { .. }
            | CalcError::ConfigValidationError { .. }
            | CalcError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CalcError::IoError(_) => ErrorCategory::Io,
            CalcError::CsvError(_)
            | CalcError::SerializationError(_)
            | CalcError::ReferenceTableError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => match self {
                CalcError::IoError(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    ErrorSeverity::Low
                }
                _ => ErrorSeverity::Critical,
            },
        }
    }

    /// Short message meant for the terminal, in the same language as the results.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::DateParseError { input, .. } => {
                format!("Data inválida: '{}'", input)
            }
            CalcError::MeasurementParseError { input } => {
                format!("Valor de Beta hCG inválido: '{}'", input)
            }
            CalcError::DateFormatError { format } => {
                format!("Formato de data inválido: '{}'", format)
            }
            CalcError::CsvError(e) => format!("Erro ao processar CSV: {}", e),
            CalcError::IoError(e) => format!("Erro de leitura/escrita: {}", e),
            CalcError::SerializationError(e) => format!("Erro ao gerar JSON: {}", e),
            CalcError::ConfigError { message } => format!("Erro de configuração: {}", message),
            CalcError::ConfigValidationError { field, message } => {
                format!("Configuração inválida em '{}': {}", field, message)
            }
            CalcError::InvalidConfigValueError { field, value, .. } => {
                format!("Valor '{}' inválido para '{}'", value, field)
            }
            CalcError::ReferenceTableError { message } => {
                format!("Tabela de referência inconsistente: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CalcError::DateParseError { format, .. } => {
                format!("Use o formato {}", display_date_format(format))
            }
            CalcError::MeasurementParseError { .. } => {
                "Informe um número, por exemplo 1250.5".to_string()
            }
            CalcError::DateFormatError { .. } => {
                "Use apenas dia, mês e ano no formato, por exemplo %d/%m/%Y".to_string()
            }
            CalcError::CsvError(_) => {
                "Verifique se o arquivo tem o cabeçalho 'measurement,lmp'".to_string()
            }
            CalcError::IoError(_) => "Verifique o caminho e as permissões do arquivo".to_string(),
            CalcError::SerializationError(_) => "Tente novamente com --format text".to_string(),
            CalcError::ConfigError { .. } | CalcError::ConfigValidationError { .. } => {
                "Revise o arquivo de configuração TOML".to_string()
            }
            CalcError::InvalidConfigValueError { reason, .. } => reason.clone(),
            CalcError::ReferenceTableError { .. } => {
                "A tabela deve cobrir as semanas 3 a 16 com limites crescentes".to_string()
            }
        }
    }
}

/// Renders a chrono format string the way users write dates, e.g. `%d/%m/%Y` -> `dd/MM/yyyy`.
pub fn display_date_format(format: &str) -> String {
    format
        .replace("%d", "dd")
        .replace("%m", "MM")
        .replace("%Y", "yyyy")
}

pub type Result<T> = std::result::Result<T, CalcError>;
