//! OAuth 2.0 Client domain types.
//!
//! A [`Client`] is owned by an external client store and is read-only to
//! the authorization endpoint.

use serde::{Deserialize, Serialize};

// =============================================================================
// Client
// =============================================================================

/// OAuth 2.0 client registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique client identifier used in OAuth flows.
    pub client_id: String,

    /// Human-readable display name.
    #[serde(default)]
    pub name: String,

    /// Registered redirect URIs, in registration order.
    /// Matching against these is a literal string comparison.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

impl Client {
    /// Creates a client with the given id and registered redirect URIs.
    #[must_use]
    pub fn new<I, S>(client_id: impl Into<String>, redirect_uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client_id: client_id.into(),
            name: String::new(),
            redirect_uris: redirect_uris.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the registered redirect URIs.
    #[must_use]
    pub fn redirect_uris(&self) -> &[String] {
        &self.redirect_uris
    }

    /// Checks if the given redirect URI is registered for this client.
    ///
    /// Simple string comparison (RFC 3986 section 6.2.1); no normalization.
    #[must_use]
    pub fn is_redirect_uri_registered(&self, uri: &str) -> bool {
        self.redirect_uris.iter().any(|registered| registered == uri)
    }

    /// Validates the client registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the client id is empty.
    pub fn validate(&self) -> Result<(), ClientValidationError> {
        if self.client_id.is_empty() {
            return Err(ClientValidationError::EmptyClientId);
        }
        Ok(())
    }
}

/// Client validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientValidationError {
    /// Client ID is empty.
    #[error("Client ID cannot be empty")]
    EmptyClientId,
}
