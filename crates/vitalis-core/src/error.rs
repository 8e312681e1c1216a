//! Error types for the Vitalis application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Vitalis application.
///
/// Every variant is recoverable: callers either show the message inline
/// (validation, auth), wipe and re-authenticate (storage corruption), or
/// show a dismissible panel with a manual retry (service and parse failures).
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum VitalisError {
    /// Required user input is missing or out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// No matching stored account or bad credentials
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Persisted session data could not be deserialized
    #[error("Storage corruption: {0}")]
    StorageCorruption(String),

    /// External generation service call failed
    #[error("Service error: {message}")]
    Service {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// External service returned a payload that does not match the requested schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// A request for the same pipeline is already pending
    #[error("The {pipeline} request is already in progress")]
    RequestInFlight { pipeline: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VitalisError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn corruption(message: impl Into<String>) -> Self {
        Self::StorageCorruption(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a Service error
    pub fn service(status_code: Option<u16>, message: impl Into<String>, is_retryable: bool) -> Self {
        Self::Service {
            status_code,
            message: message.into(),
            is_retryable,
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn in_flight(pipeline: impl Into<String>) -> Self {
        Self::RequestInFlight {
            pipeline: pipeline.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::StorageCorruption(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::RequestInFlight { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this error came from the external service, either as a failed
    /// call or as a non-conforming payload.
    pub fn is_service_failure(&self) -> bool {
        matches!(self, Self::Service { .. } | Self::Parse(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for VitalisError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for VitalisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VitalisError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for VitalisError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, VitalisError>`.
pub type Result<T> = std::result::Result<T, VitalisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_failure_covers_parse_and_service() {
        assert!(VitalisError::parse("bad json").is_service_failure());
        assert!(VitalisError::service(Some(503), "unavailable", true).is_service_failure());
        assert!(!VitalisError::validation("empty").is_service_failure());
        assert!(!VitalisError::auth("nope").is_service_failure());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: VitalisError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        match err {
            VitalisError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_in_flight() {
        let err = VitalisError::RequestInFlight {
            pipeline: "analysis".to_string(),
        };
        assert_eq!(err.to_string(), "The analysis request is already in progress");
    }
}
