use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Submission rejected with HTTP status {status}")]
    SubmissionRejected { status: u16 },

    #[error("Unknown input field: {name}")]
    UnknownField { name: String },

    #[error("Unrecognized command: {input}")]
    UnknownCommand { input: String },
}

impl RoiError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            RoiError::ApiError(_) | RoiError::SubmissionRejected { .. } => {
                "Could not reach the submission endpoint".to_string()
            }
            RoiError::IoError(e) => format!("File access failed: {}", e),
            RoiError::SerializationError(_) => {
                "Could not encode the calculation payload".to_string()
            }
            RoiError::ConfigError { message } => format!("Configuration problem: {}", message),
            RoiError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            RoiError::UnknownField { name } => format!("'{}' is not a calculator input", name),
            RoiError::UnknownCommand { input } => format!("Don't know how to '{}'", input),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RoiError::ApiError(_) | RoiError::SubmissionRejected { .. } => {
                "Check HUBSPOT_PORTAL_ID / HUBSPOT_FORM_ID and network access"
            }
            RoiError::IoError(_) => "Check that the config file exists and is readable",
            RoiError::SerializationError(_) => "Report this as a bug",
            RoiError::ConfigError { .. } | RoiError::InvalidConfigValueError { .. } => {
                "Fix the value in the config file or command-line flags"
            }
            RoiError::UnknownField { .. } => "Type 'show' to list the available fields",
            RoiError::UnknownCommand { .. } => "Type 'help' to list the available commands",
        }
    }
}

pub type Result<T> = std::result::Result<T, RoiError>;
