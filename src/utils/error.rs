use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing environment variable: {var}")]
    MissingEnvError { var: String },

    #[error("Failed to start SQL client '{program}': {source}")]
    ClientSpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("SQL client '{program}' exited with {status}")]
    ClientFailedError {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Row {row} is not valid UTF-8: {source}")]
    RowEncodingError {
        row: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Unexpected row shape at row {row}: expected 4 newline-delimited parts, found {parts}")]
    UnexpectedRowShapeError { row: usize, parts: usize },

    #[error("Malformed timestamp '{timestamp}' for content {content_id}")]
    MalformedTimestampError {
        timestamp: String,
        content_id: String,
    },

    #[error("Markup parse error: {0}")]
    MarkupError(#[from] roxmltree::Error),

    #[error("Required field '{field}' missing from content {content_id}")]
    MissingFieldError { field: String, content_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    ExternalTool,
    Data,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ImportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingEnvError { .. } => ErrorCategory::Configuration,
            ImportError::ClientSpawnError { .. } | ImportError::ClientFailedError { .. } => {
                ErrorCategory::ExternalTool
            }
            ImportError::RowEncodingError { .. }
            | ImportError::UnexpectedRowShapeError { .. }
            | ImportError::MalformedTimestampError { .. }
            | ImportError::MarkupError(_)
            | ImportError::MissingFieldError { .. } => ErrorCategory::Data,
            ImportError::IoError(_) | ImportError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單筆標記解析失敗只會跳過該列
            ImportError::MarkupError(_) => ErrorSeverity::Low,
            _ => match self.category() {
                ErrorCategory::Configuration | ErrorCategory::ExternalTool => ErrorSeverity::High,
                ErrorCategory::Data | ErrorCategory::Output => ErrorSeverity::Critical,
            },
        }
    }

    /// Whether the pipeline may skip the current row and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ImportError::MarkupError(_))
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::ClientFailedError {
                program, stderr, ..
            } => format!("ERROR: while calling {}\n{}", program, stderr),
            ImportError::MissingEnvError { var } => {
                format!("Environment variable {} is not set", var)
            }
            ImportError::ClientSpawnError { program, .. } => {
                format!("Could not run SQL client '{}'", program)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the MBTA_SQL_* environment variables and the profile configuration"
            }
            ErrorCategory::ExternalTool => {
                "Make sure the SQL client is installed and the connection settings are valid"
            }
            ErrorCategory::Data => "Inspect the offending row in the source database",
            ErrorCategory::Output => "Check that the target directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_failure_exits_with_one() {
        let err = ImportError::ClientFailedError {
            program: "bsqldb".to_string(),
            status: "exit status: 2".to_string(),
            stderr: "Login failed".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::ExternalTool);
        assert_eq!(err.severity().exit_code(), 1);
        assert_eq!(
            err.user_friendly_message(),
            "ERROR: while calling bsqldb\nLogin failed"
        );
    }

    #[test]
    fn test_severity_exit_codes() {
        assert_eq!(ErrorSeverity::Low.exit_code(), 0);
        assert_eq!(ErrorSeverity::High.exit_code(), 1);
        assert_eq!(ErrorSeverity::Critical.exit_code(), 3);
    }

    #[test]
    fn test_data_errors_are_critical() {
        let shape = ImportError::UnexpectedRowShapeError { row: 0, parts: 2 };
        let missing = ImportError::MissingFieldError {
            field: "Information".to_string(),
            content_id: "7".to_string(),
        };
        assert_eq!(shape.severity(), ErrorSeverity::Critical);
        assert_eq!(missing.severity().exit_code(), 3);
        assert!(!missing.is_recoverable());
    }

    #[test]
    fn test_markup_error_is_recoverable() {
        let err = match roxmltree::Document::parse("<a>") {
            Err(e) => ImportError::from(e),
            Ok(_) => panic!("unterminated element should not parse"),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_missing_env_is_configuration() {
        let err = ImportError::MissingEnvError {
            var: "MBTA_SQL_SERVER".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity().exit_code(), 1);
        assert!(err.user_friendly_message().contains("MBTA_SQL_SERVER"));
    }
}
