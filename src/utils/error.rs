use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Order {index}: cannot parse date from '{raw}'")]
    InvalidDate { index: usize, raw: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::IoError(_) => ErrorCategory::Io,
            ExportError::ConfigError { .. }
            | ExportError::ConfigValidationError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ExportError::CsvError(_)
            | ExportError::SerializationError(_)
            | ExportError::InvalidDate { .. }
            | ExportError::ProcessingError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ExportError::InvalidDate { .. } => ErrorSeverity::Medium,
            ExportError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ExportError::IoError(_) => {
                "Check that the input page exists and the output directory is writable"
            }
            ExportError::InvalidDate { .. } => {
                "Check the order heading format, or run without --strict-dates"
            }
            ExportError::ConfigError { .. }
            | ExportError::ConfigValidationError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. } => {
                "Fix the configuration value and run again"
            }
            ExportError::CsvError(_)
            | ExportError::SerializationError(_)
            | ExportError::ProcessingError { .. } => {
                "Re-run with --verbose to see which order failed"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ExportError::IoError(e) => format!("File access failed: {}", e),
            ExportError::InvalidDate { index, raw } => {
                format!("Order #{} has an unreadable date: '{}'", index + 1, raw)
            }
            ExportError::MissingConfigError { field } => {
                format!("Missing setting '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
