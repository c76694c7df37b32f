use thiserror::Error;

#[derive(Error, Debug)]
pub enum FulfillmentError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Remote service returned HTTP {status}: {message}")]
    TransportError { status: u16, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing sku for {variant}")]
    MissingSku { variant: String },

    #[error("Ship address field '{field}' is not set")]
    MissingAddressField { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// 錯誤類別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    DataIntegrity,
    System,
}

/// 錯誤嚴重程度，CLI 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FulfillmentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::TransportError { .. } => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::MissingSku { .. }
            | Self::MissingAddressField { .. }
            | Self::ValidationError { .. }
            | Self::SerializationError(_) => ErrorCategory::DataIntegrity,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::DataIntegrity => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Transport-level failures may succeed on a later attempt; everything else needs a fix first.
    pub fn is_transient(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) | Self::TransportError { .. } => {
                "Check network connectivity and the remote endpoint, then retry later"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and environment variables"
            }
            Self::MissingSku { .. } => "Assign a SKU to every variant in the shipment",
            Self::MissingAddressField { .. } => "Complete the order's ship address",
            Self::ValidationError { .. } | Self::SerializationError(_) => {
                "Inspect the shipment data for missing or malformed fields"
            }
            Self::IoError(_) => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::TransportError { .. } => {
                format!("Could not reach the fulfillment service: {}", self)
            }
            Self::MissingSku { variant } => {
                format!("The shipment contains '{}' which has no SKU", variant)
            }
            Self::MissingAddressField { field } => {
                format!("The ship address is incomplete ({} is missing)", field)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FulfillmentError>;
