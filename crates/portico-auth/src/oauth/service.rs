//! Authorization request builder.
//!
//! Turns an inbound request into a validated [`AuthorizationRequest`].
//! Validation runs as an ordered sequence of fail-fast steps:
//!
//! 1. Parse form parameters (`invalid_request`)
//! 2. Look up `client_id` in the client store (`invalid_client`)
//! 3. Extract and unescape `redirect_uri` (`invalid_request`)
//! 4. Resolve the redirect URI against the client (`invalid_request`)
//! 5. Split `response_type`
//! 6. Check `state` length (`invalid_state`)
//! 7. Split `scope`
//!
//! # Usage
//!
//! ```ignore
//! use portico_auth::oauth::AuthorizationService;
//!
//! let service = AuthorizationService::new(client_storage, AuthorizeConfig::default());
//! let request = service.new_authorize_request(&raw).await?;
//! ```

use std::sync::Arc;

use url::Url;

use crate::AuthResult;
use crate::config::AuthorizeConfig;
use crate::error::AuthError;
use crate::oauth::authorize::{Arguments, AuthorizationRequest};
use crate::oauth::params::RawAuthorizeRequest;
use crate::oauth::redirect_uri::{match_redirect_uri, redirect_uri_from_params};
use crate::storage::ClientStorage;

/// A failed authorization request.
///
/// Carries the redirect URI when it had already been verified before the
/// failing step, so the error can be delivered to the client instead of
/// being shown to the user agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeRejection {
    error: AuthError,
    redirect_uri: Option<Url>,
}

impl AuthorizeRejection {
    /// Creates a rejection with no verified redirect URI.
    #[must_use]
    pub fn new(error: AuthError) -> Self {
        Self {
            error,
            redirect_uri: None,
        }
    }

    /// Creates a rejection that may be redirected to `redirect_uri`.
    #[must_use]
    pub fn with_redirect_uri(error: AuthError, redirect_uri: Url) -> Self {
        Self {
            error,
            redirect_uri: Some(redirect_uri),
        }
    }

    /// The underlying error.
    #[must_use]
    pub fn error(&self) -> &AuthError {
        &self.error
    }

    /// The verified redirect URI, if validation got that far.
    #[must_use]
    pub fn redirect_uri(&self) -> Option<&Url> {
        self.redirect_uri.as_ref()
    }

    /// Returns `true` if the error may be sent to the redirect URI.
    #[must_use]
    pub fn is_redirect_uri_valid(&self) -> bool {
        self.redirect_uri.is_some()
    }
}

impl From<AuthError> for AuthorizeRejection {
    fn from(error: AuthError) -> Self {
        Self::new(error)
    }
}

/// Builds validated authorization requests.
pub struct AuthorizationService {
    /// Client storage for looking up registered clients.
    client_storage: Arc<dyn ClientStorage>,

    /// Service configuration.
    config: AuthorizeConfig,
}

impl AuthorizationService {
    /// Creates a new authorization service.
    #[must_use]
    pub fn new(client_storage: Arc<dyn ClientStorage>, config: AuthorizeConfig) -> Self {
        Self {
            client_storage,
            config,
        }
    }

    /// Validates an inbound request.
    ///
    /// The first failing step short-circuits the remaining ones.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthorizeRejection`] with:
    /// - `InvalidRequest` if the form is malformed or the redirect URI cannot
    ///   be unescaped, is unregistered, relative or carries a fragment
    /// - `InvalidClient` if the client is unknown or the store fails
    /// - `InvalidState` if the state is missing or too short; the verified
    ///   redirect URI is attached
    ///
    /// # Security
    ///
    /// Never log the state parameter.
    pub async fn new_authorize_request(
        &self,
        raw: &RawAuthorizeRequest,
    ) -> Result<AuthorizationRequest, AuthorizeRejection> {
        // 1. Parse form
        let params = raw.parse_form()?;

        // 2. Resolve client
        let client_id = params.get("client_id");
        let client = match self.client_storage.find_by_client_id(client_id).await {
            Ok(Some(client)) => client,
            Ok(None) => return Err(AuthError::invalid_client("Unknown client").into()),
            Err(e) => {
                tracing::warn!(client_id = %client_id, error = %e, "Client lookup failed");
                return Err(AuthError::invalid_client("Client lookup failed").into());
            }
        };

        // 3-4. Resolve redirect_uri
        let raw_redirect_uri = redirect_uri_from_params(&params)?;
        let redirect_uri = match_redirect_uri(&raw_redirect_uri, &client)?;

        // 5. Response types
        let response_types = Arguments::parse(params.get("response_type"));

        // 6. State (RFC 6819 4.4.1.8: must not be guessable)
        let state = params.get("state");
        if let Err(e) = self.validate_state(state) {
            return Err(AuthorizeRejection::with_redirect_uri(e, redirect_uri));
        }
        let state = state.to_string();

        // 7. Scopes
        let scopes = Arguments::parse(params.get("scope"));

        Ok(AuthorizationRequest::new(
            client,
            redirect_uri,
            response_types,
            state,
            scopes,
            params,
        ))
    }

    /// Validates that the state is present and long enough to be
    /// considered unguessable.
    fn validate_state(&self, state: &str) -> AuthResult<()> {
        if state.is_empty() {
            return Err(AuthError::invalid_state("Missing state parameter"));
        }

        let length = state.chars().count();
        if length < self.config.min_state_length {
            return Err(AuthError::invalid_state(format!(
                "State parameter is too short (minimum {} characters, got {})",
                self.config.min_state_length, length
            )));
        }

        Ok(())
    }
}
