use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid page request: {field} must be non-negative, got {value}")]
    InvalidPageRequest { field: String, value: i64 },

    #[error("Fundraiser #{index} not found")]
    FundraiserNotFound { index: usize },

    #[error("Creation event for fundraiser #{index} was not delivered")]
    EventNotDelivered { index: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RegistryError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::InvalidPageRequest { .. } => ErrorCategory::Input,
            Self::FundraiserNotFound { .. } => ErrorCategory::Lookup,
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            Self::EventNotDelivered { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for printing to a terminal user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { field, reason } => {
                format!("The fundraiser could not be created: {} ({})", reason, field)
            }
            Self::InvalidPageRequest { field, .. } => {
                format!("The '{}' paging argument must not be negative", field)
            }
            Self::FundraiserNotFound { index } => format!("No fundraiser exists at #{}", index),
            Self::EventNotDelivered { index } => {
                format!("Fundraiser #{} was created but its event was lost", index)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration value '{}' is invalid: {}", field, message)
            }
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::SerializationError(e) => format!("Could not encode output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => {
                "Provide a non-empty name, url, image url, description and beneficiary"
            }
            Self::InvalidPageRequest { .. } => "Use zero or a positive number for limit and offset",
            Self::FundraiserNotFound { .. } => "Run `count` to see how many fundraisers exist",
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the TOML file and any ${VAR} environment variables it references"
            }
            Self::IoError(_) => "Make sure the file exists and is readable",
            Self::EventNotDelivered { .. } | Self::SerializationError(_) => {
                "Please report this as a bug"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
