use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BurndownError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BurndownError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } | Self::InvalidRange { .. } | Self::Csv(_) => {
                ErrorCategory::Input
            }
            Self::Config { .. } | Self::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            Self::Io(_) | Self::Serialization(_) | Self::Zip(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // input errors: fix and rerun
            Self::Validation { .. } | Self::InvalidRange { .. } => ErrorSeverity::Medium,
            Self::Csv(_) | Self::Config { .. } | Self::InvalidConfigValue { .. } => {
                ErrorSeverity::High
            }
            Self::Io(_) | Self::Serialization(_) | Self::Zip(_) => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the binaries: 2 fix input, 1 fix config, 3 environment.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::Validation { .. } => {
                "Check the start/end dates (YYYY-MM-DD) and that the total is a positive number"
                    .to_string()
            }
            Self::InvalidRange { .. } => {
                "Pick an estimated completion date on or after the start date".to_string()
            }
            Self::Csv(_) => {
                "Make sure the observations file has a 'date,count' header and integer counts"
                    .to_string()
            }
            Self::Config { .. } => {
                "Review the configuration file against the documented sections".to_string()
            }
            Self::InvalidConfigValue { field, .. } => {
                format!("Fix the value of '{}' and try again", field)
            }
            Self::Io(_) | Self::Zip(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            Self::Serialization(_) => "Report this as a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::InvalidRange { .. } => {
                "Estimated date must be on or after start date.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BurndownError>;
