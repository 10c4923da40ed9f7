//! Error types for Courtside.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Courtside client crates.
///
/// Variants mirror the failure classes a user can actually hit: the request
/// never reached the service, the service answered with garbage, the service
/// refused the request, or the request was rejected locally before sending.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourtsideError {
    /// Network failure or non-2xx HTTP status
    #[error("{method} failed: {message}")]
    Transport {
        method: &'static str,
        message: String,
    },

    /// Response body was not valid JSON or did not match the envelope
    #[error("Invalid response: {0}")]
    MalformedResponse(String),

    /// The booking service replied with `ok: false`
    #[error("{0}")]
    Backend(String),

    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

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

impl CourtsideError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error for a GET request
    pub fn get_failed(message: impl Into<String>) -> Self {
        Self::Transport {
            method: "GET",
            message: message.into(),
        }
    }

    /// Creates a Transport error for a POST request
    pub fn post_failed(message: impl Into<String>) -> Self {
        Self::Transport {
            method: "POST",
            message: message.into(),
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a Backend error, falling back to `default` when the service
    /// did not say what went wrong.
    pub fn backend(message: Option<String>, default: &str) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default.to_string());
        Self::Backend(message)
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a MalformedResponse error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Check if this is a Backend error
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true when a request was attempted and failed on the wire or
    /// at the service, as opposed to being rejected locally.
    ///
    /// Callers use this to decide whether an alternate endpoint is worth
    /// trying.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::MalformedResponse(_) | Self::Backend(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CourtsideError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CourtsideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CourtsideError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CourtsideError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for CourtsideError {
    fn from(err: minijinja::Error) -> Self {
        Self::Internal(format!("template error: {err}"))
    }
}

/// A type alias for `Result<T, CourtsideError>`.
pub type Result<T> = std::result::Result<T, CourtsideError>;
