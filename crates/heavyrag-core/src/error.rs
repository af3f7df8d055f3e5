//! Error types for heavyrag

use thiserror::Error;

/// Result type alias using RagError
pub type Result<T> = std::result::Result<T, RagError>;

/// Error type alias for convenience
pub type Error = RagError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const GENERAL_ERROR: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for heavyrag
#[derive(Debug, Error)]
pub enum RagError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service error (HTTP {status}): {body}")]
    Service { status: u16, body: String },

    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RagError {
    /// Whether this error came from talking to a remote service
    /// (unreachable, rejected the call, or replied with something unusable).
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Service { .. } | Self::EmptyResponse(_) | Self::Serialization(_)
        )
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Yaml(_) => exit_codes::INVALID_INPUT,
            Self::InvalidInput(_) => exit_codes::USAGE,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_are_classified() {
        let err = RagError::Service {
            status: 403,
            body: "denied".to_string(),
        };
        assert!(err.is_service_error());
        assert!(RagError::EmptyResponse("model".to_string()).is_service_error());
        assert!(!RagError::Config("bad".to_string()).is_service_error());
        assert!(!RagError::InvalidInput("empty".to_string()).is_service_error());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            RagError::Config("x".to_string()).exit_code(),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(
            RagError::InvalidInput("x".to_string()).exit_code(),
            exit_codes::USAGE
        );
        assert_eq!(
            RagError::EmptyResponse("x".to_string()).exit_code(),
            exit_codes::GENERAL_ERROR
        );
    }

    #[test]
    fn test_service_error_display() {
        let err = RagError::Service {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Service error (HTTP 500): boom");
    }
}
