//! Error types for the MediBot client.

use thiserror::Error;

/// A shared error type for the entire MediBot client.
///
/// Variants follow the failure taxonomy of the client: transport failures,
/// application-level failures reported by the server, local validation,
/// local storage, and document handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MedibotError {
    /// Required user input was missing or blank
    #[error("{0}")]
    Validation(String),

    /// The request never produced a response (connection, timeout, DNS)
    #[error("Network error: {message}")]
    Transport { message: String },

    /// The server answered with a non-success status
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The server answered but the body lacked an expected field or shape
    #[error("Unexpected server response: {0}")]
    InvalidResponse(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Decoding, writing or opening a generated document failed
    #[error("Document error: {0}")]
    Document(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation needed a signed-in identity
    #[error("No user is signed in")]
    NotSignedIn,

    /// A request is already outstanding for this flow
    #[error("Still waiting for the previous reply")]
    Busy,

    /// A wizard action is not allowed in the current stage
    #[error("Cannot {action} while in the {stage} stage")]
    InvalidTransition { stage: String, action: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
}

impl MedibotError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an Api error
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates an InvalidResponse error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Document error
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(stage: impl Into<String>, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            stage: stage.into(),
            action: action.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the failure happened before or while talking to the server
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Api { .. } | Self::InvalidResponse(_)
        )
    }

    /// Check if this is a local storage failure
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Serialization { .. })
    }

    /// Check if this is an InvalidTransition error
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MedibotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MedibotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MedibotError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MedibotError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MedibotError>`.
pub type Result<T> = std::result::Result<T, MedibotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_server_message() {
        let err = MedibotError::api(Some(404), "User not found");
        assert_eq!(err.to_string(), "User not found");
        assert!(err.is_network());
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: MedibotError = io.into();
        assert!(err.is_storage());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = MedibotError::invalid_transition("success", "answer a question");
        assert!(err.is_invalid_transition());
        assert_eq!(
            err.to_string(),
            "Cannot answer a question while in the success stage"
        );
    }
}
