//! Authorization endpoint error types.
//!
//! This module defines the errors raised while building, dispatching and
//! answering an authorization request, and their mapping onto the
//! RFC 6749 wire vocabulary.

use std::fmt;

use axum::http::StatusCode;
use serde::Serialize;

/// Errors that can occur while handling an authorization request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The request is malformed or the redirect URI is invalid or unregistered.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of why the request is invalid.
        message: String,
    },

    /// The client is unknown to the client store.
    #[error("Invalid client: {message}")]
    InvalidClient {
        /// Description of why the client is invalid.
        message: String,
    },

    /// The state parameter is missing or too short to be unguessable.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of why the state is invalid.
        message: String,
    },

    /// No registered response type handler accepted the request.
    #[error("No response type handler found")]
    NoResponseTypeHandlerFound,

    /// A handler denied the request.
    #[error("Access denied: {message}")]
    AccessDenied {
        /// Description of why access was denied.
        message: String,
    },

    /// An error occurred while reading from a collaborator store.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidClient` error.
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::InvalidClient {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidState` error.
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Creates a new `AccessDenied` error.
    #[must_use]
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !self.is_server_error()
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    /// Returns the OAuth 2.0 error code for this error.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::InvalidClient { .. } => "invalid_client",
            Self::InvalidState { .. } => "invalid_state",
            Self::NoResponseTypeHandlerFound => "unsupported_response_type",
            Self::AccessDenied { .. } => "access_denied",
            Self::Storage { .. } => "server_error",
        }
    }

    /// Returns the human-readable description sent alongside the error code.
    ///
    /// Internal detail is not exposed; every kind has a fixed description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => {
                "The request is missing a required parameter, includes an invalid parameter value, or is otherwise malformed"
            }
            Self::InvalidClient { .. } => "Client authentication failed (unknown client)",
            Self::InvalidState { .. } => {
                "The state is missing or has less than 8 characters and is therefore considered too weak"
            }
            Self::NoResponseTypeHandlerFound => {
                "The authorization server does not support obtaining a response using this response type"
            }
            Self::AccessDenied { .. } => {
                "The resource owner or authorization server denied the request"
            }
            Self::Storage { .. } => {
                "The authorization server encountered an unexpected condition that prevented it from fulfilling the request"
            }
        }
    }

    /// Returns the HTTP status used when the error is rendered as a JSON body.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidClient { .. } => StatusCode::UNAUTHORIZED,
            Self::AccessDenied { .. } => StatusCode::FORBIDDEN,
            _ if self.is_server_error() => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Converts this error into its wire representation.
    #[must_use]
    pub fn to_rfc_error(&self) -> RfcError {
        RfcError {
            error: self.oauth_error_code(),
            error_description: self.description(),
            status: self.status_code(),
        }
    }
}

/// An error translated to the RFC 6749 wire vocabulary.
///
/// Serializes to `{"error": ..., "error_description": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RfcError {
    /// Stable wire identifier, e.g. `invalid_request`.
    pub error: &'static str,

    /// Human-readable description.
    pub error_description: &'static str,

    /// HTTP status used for direct (non-redirect) rendering.
    #[serde(skip)]
    pub status: StatusCode,
}

impl fmt::Display for RfcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.error_description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::invalid_client("client not found");
        assert_eq!(err.to_string(), "Invalid client: client not found");

        let err = AuthError::invalid_state("too short");
        assert_eq!(err.to_string(), "Invalid state: too short");

        let err = AuthError::NoResponseTypeHandlerFound;
        assert_eq!(err.to_string(), "No response type handler found");
    }

    #[test]
    fn test_error_predicates() {
        assert!(AuthError::invalid_request("x").is_client_error());
        assert!(AuthError::invalid_state("x").is_client_error());
        assert!(AuthError::NoResponseTypeHandlerFound.is_client_error());

        let err = AuthError::storage("database down");
        assert!(!err.is_client_error());
        assert!(err.is_server_error());
    }

    #[test]
    fn test_oauth_error_code() {
        assert_eq!(
            AuthError::invalid_request("test").oauth_error_code(),
            "invalid_request"
        );
        assert_eq!(
            AuthError::invalid_client("test").oauth_error_code(),
            "invalid_client"
        );
        assert_eq!(
            AuthError::invalid_state("test").oauth_error_code(),
            "invalid_state"
        );
        assert_eq!(
            AuthError::NoResponseTypeHandlerFound.oauth_error_code(),
            "unsupported_response_type"
        );
        assert_eq!(AuthError::storage("boom").oauth_error_code(), "server_error");
    }

    #[test]
    fn test_errors_compare_structurally() {
        assert_eq!(
            AuthError::invalid_state("short"),
            AuthError::invalid_state("short")
        );
        assert!(matches!(
            AuthError::invalid_state("anything"),
            AuthError::InvalidState { .. }
        ));
    }

    #[test]
    fn test_rfc_error_hides_internal_detail() {
        let rfc = AuthError::invalid_request("url parse failed at byte 17").to_rfc_error();
        assert_eq!(rfc.error, "invalid_request");
        assert!(!rfc.error_description.contains("byte 17"));
        assert_eq!(rfc.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rfc_error_serialize() {
        let rfc = AuthError::invalid_state("short").to_rfc_error();
        let json = serde_json::to_value(&rfc).unwrap();

        assert_eq!(json["error"], "invalid_state");
        assert!(json["error_description"].as_str().unwrap().contains("state"));
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::invalid_client("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::storage("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::NoResponseTypeHandlerFound.status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
