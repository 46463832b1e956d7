use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("File watch error: {0}")]
    WatchError(#[from] notify::Error),

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Path '{path}' has no '{segment}' segment")]
    MissingSegmentError { segment: String, path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Documentation generator failed: {message}")]
    GeneratorError { message: String },

    #[error("Background task failed: {message}")]
    TaskError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Generator,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DocError {
    pub fn validation(message: impl Into<String>) -> Self {
        DocError::ValidationError {
            message: message.into(),
        }
    }

    pub fn missing_segment(segment: &str, path: &std::path::Path) -> Self {
        DocError::MissingSegmentError {
            segment: segment.to_string(),
            path: path.display().to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DocError::ValidationError { .. } | DocError::MissingSegmentError { .. } => {
                ErrorCategory::Input
            }
            DocError::ConfigError { .. }
            | DocError::InvalidConfigValueError { .. }
            | DocError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DocError::GeneratorError { .. } | DocError::SerializationError(_) => {
                ErrorCategory::Generator
            }
            DocError::IoError(_) | DocError::WatchError(_) | DocError::TaskError { .. } => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Generator => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DocError::ValidationError { message } => message.clone(),
            DocError::MissingSegmentError { segment, .. } => format!(
                "The selected file is not inside a '{}' directory of a service module",
                segment
            ),
            DocError::GeneratorError { message } => {
                format!("The documentation generator did not finish: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DocError::ValidationError { .. } => "Select a Java source file (*.java) and try again",
            DocError::MissingSegmentError { .. } => {
                "Use a file laid out as <project>/<service>/src/main/java/<package>/<File>.java"
            }
            DocError::ConfigError { .. }
            | DocError::InvalidConfigValueError { .. }
            | DocError::MissingConfigError { .. } => "Check the settings file and CLI flags",
            DocError::GeneratorError { .. } | DocError::SerializationError(_) => {
                "Run the generator command by hand to inspect its output"
            }
            DocError::IoError(_) | DocError::WatchError(_) | DocError::TaskError { .. } => {
                "Check file permissions and available disk space"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DocError>;
