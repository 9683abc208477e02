use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid ISBN: {0}")]
    InvalidIsbn(#[from] crate::core::isbn::InvalidLength),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// User input problems, fixable by retyping the command.
    Low,
    /// Network failures against the public APIs.
    Medium,
    /// Local data problems (corrupt store, failed write).
    High,
    /// Configuration problems that block startup.
    Critical,
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::InvalidIsbn(_) | AppError::RecordNotFound { .. } => ErrorSeverity::Low,
            AppError::ApiError(_) => ErrorSeverity::Medium,
            AppError::IoError(_)
            | AppError::SerializationError(_)
            | AppError::CsvError(_)
            | AppError::ProcessingError { .. } => ErrorSeverity::High,
            AppError::ConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::InvalidIsbn(e) => {
                format!("That does not look like an ISBN: {}", e)
            }
            AppError::RecordNotFound { id } => {
                format!("No record with id {} exists", id)
            }
            AppError::ApiError(_) => {
                "A request to an external service failed. Check your network connection and try again."
                    .to_string()
            }
            AppError::IoError(e) => format!("Could not read or write local data: {}", e),
            AppError::SerializationError(e) => {
                format!("The local data files could not be parsed: {}", e)
            }
            AppError::CsvError(e) => format!("CSV export failed: {}", e),
            AppError::ConfigError { message } => format!("Configuration problem: {}", message),
            AppError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!(
                "Configuration value {}='{}' is invalid: {}",
                field, value, reason
            ),
            AppError::ProcessingError { message } => message.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
