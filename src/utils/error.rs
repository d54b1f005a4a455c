use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudentDbError {
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Query '{query}' requires argument '{argument}'")]
    MissingArgument { query: String, argument: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Query,
    Input,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StudentDbError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StudentDbError::IndexOutOfBounds { .. } | StudentDbError::MissingArgument { .. } => {
                ErrorCategory::Query
            }
            StudentDbError::CsvError(_) => ErrorCategory::Input,
            StudentDbError::IoError(_) | StudentDbError::SerializationError(_) => {
                ErrorCategory::Output
            }
            StudentDbError::ConfigError { .. }
            | StudentDbError::InvalidConfigValueError { .. }
            | StudentDbError::MissingConfigError { .. }
            | StudentDbError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StudentDbError::IndexOutOfBounds { .. } | StudentDbError::MissingArgument { .. } => {
                ErrorSeverity::Medium
            }
            StudentDbError::CsvError(_) | StudentDbError::SerializationError(_) => {
                ErrorSeverity::High
            }
            StudentDbError::IoError(_) => ErrorSeverity::Critical,
            StudentDbError::ConfigError { .. }
            | StudentDbError::InvalidConfigValueError { .. }
            | StudentDbError::MissingConfigError { .. }
            | StudentDbError::ConfigValidationError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StudentDbError::IndexOutOfBounds { len, .. } => {
                format!("Use indices between 0 and {}", len.saturating_sub(1))
            }
            StudentDbError::MissingArgument { argument, .. } => {
                format!("Pass --{} or set '{}' in the query plan", argument, argument)
            }
            StudentDbError::CsvError(_) => {
                "Check that the CSV header is id,first_name,last_name,group".to_string()
            }
            StudentDbError::SerializationError(_) => {
                "Check that the JSON input is an array of student objects".to_string()
            }
            StudentDbError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            StudentDbError::ConfigError { .. } | StudentDbError::ConfigValidationError { .. } => {
                "Review the query plan file for syntax errors".to_string()
            }
            StudentDbError::InvalidConfigValueError { field, .. }
            | StudentDbError::MissingConfigError { field } => {
                format!("Fix the '{}' setting and try again", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Query => format!("Query failed: {}", self),
            ErrorCategory::Input => format!("Could not read students: {}", self),
            ErrorCategory::Output => format!("Could not produce report: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, StudentDbError>;
