use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinmateError {
    #[error("Invalid input for '{field}' ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Message is required")]
    EmptyMessage,

    #[error("A request is already in progress")]
    RequestInFlight,

    #[error("Model request failed with status {status}: {message}")]
    ModelError { status: u16, message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Conversation not found: {id}")]
    ConversationNotFound { id: String },

    #[error("Message not found: {id}")]
    MessageNotFound { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Chat,
    Network,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinmateError {
    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        FinmateError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FinmateError::InvalidInput { .. } | FinmateError::EmptyMessage => ErrorCategory::Input,
            FinmateError::RequestInFlight
            | FinmateError::ConversationNotFound { .. }
            | FinmateError::MessageNotFound { .. } => ErrorCategory::Chat,
            FinmateError::ModelError { .. } | FinmateError::ApiError(_) => ErrorCategory::Network,
            FinmateError::IoError(_) | FinmateError::SerializationError(_) => ErrorCategory::Storage,
            FinmateError::ConfigError { .. }
            | FinmateError::ConfigValidationError { .. }
            | FinmateError::InvalidConfigValueError { .. }
            | FinmateError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FinmateError::EmptyMessage => ErrorSeverity::Low,
            FinmateError::RequestInFlight
            | FinmateError::ModelError { .. }
            | FinmateError::ApiError(_) => ErrorSeverity::Medium,
            FinmateError::InvalidInput { .. }
            | FinmateError::ConversationNotFound { .. }
            | FinmateError::MessageNotFound { .. } => ErrorSeverity::High,
            FinmateError::IoError(_)
            | FinmateError::SerializationError(_)
            | FinmateError::ConfigError { .. }
            | FinmateError::ConfigValidationError { .. }
            | FinmateError::InvalidConfigValueError { .. }
            | FinmateError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for the CLI; low-severity errors exit cleanly.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FinmateError::InvalidInput { .. } => {
                "Please enter valid positive numbers".to_string()
            }
            FinmateError::EmptyMessage => "Type a message before sending".to_string(),
            FinmateError::RequestInFlight => {
                "Wait for the current reply to finish, then send again".to_string()
            }
            FinmateError::ModelError { status, .. } if *status == 401 || *status == 403 => {
                "Check that GEMINI_API_KEY is valid".to_string()
            }
            FinmateError::ModelError { status, .. } if *status == 429 => {
                "The model is rate limited, retry in a moment".to_string()
            }
            FinmateError::ModelError { .. } | FinmateError::ApiError(_) => {
                "Check your network connection and the model endpoint, then retry".to_string()
            }
            FinmateError::IoError(_) => {
                "Check that the data directory exists and is writable".to_string()
            }
            FinmateError::SerializationError(_) => {
                "The conversation file may be corrupted; move it aside and retry".to_string()
            }
            FinmateError::ConfigError { .. }
            | FinmateError::ConfigValidationError { .. }
            | FinmateError::InvalidConfigValueError { .. } => {
                "Review the configuration file for typos and invalid values".to_string()
            }
            FinmateError::MissingConfigError { field } => {
                format!("Set '{}' in the config file or the environment", field)
            }
            FinmateError::ConversationNotFound { .. } | FinmateError::MessageNotFound { .. } => {
                "Run `finmate chats list` to see available conversations".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FinmateError::InvalidInput { field, reason, .. } => {
                format!("Invalid {}: {}", field.replace('_', " "), reason)
            }
            FinmateError::ModelError { message, .. } => {
                format!("The assistant could not answer: {}", message)
            }
            FinmateError::ApiError(_) => "Failed to get response".to_string(),
            FinmateError::MissingConfigError { field } => {
                format!("Missing configuration: {}", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinmateError>;
