use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Dataset error: {message}")]
    DatasetError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FormError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormError::TomlError(_)
            | FormError::MissingConfigError { .. }
            | FormError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FormError::CsvError(_)
            | FormError::DatasetError { .. }
            | FormError::ValidationError { .. } => ErrorCategory::Data,
            FormError::IoError(_) | FormError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FormError::ValidationError { .. } => ErrorSeverity::Medium,
            FormError::CsvError(_)
            | FormError::DatasetError { .. }
            | FormError::TomlError(_)
            | FormError::MissingConfigError { .. }
            | FormError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            FormError::IoError(_) | FormError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FormError::IoError(e) => format!("Could not read or write a file: {}", e),
            FormError::CsvError(e) => format!("The dataset could not be parsed: {}", e),
            FormError::TomlError(e) => format!("The configuration file is not valid TOML: {}", e),
            FormError::MissingConfigError { field } => {
                format!("The setting '{}' is required", field)
            }
            FormError::InvalidConfigValueError { field, reason, .. } => {
                format!("The setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the form configuration file and CLI arguments",
            ErrorCategory::Data => "Check that the dataset and application values are well formed",
            ErrorCategory::System => "Check file paths and permissions, then retry",
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = FormError::MissingConfigError {
            field: "selectors.ltv".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("selectors.ltv"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: FormError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.exit_code(), 3);
    }
}
