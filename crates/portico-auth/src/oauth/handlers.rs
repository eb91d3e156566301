//! Built-in response type handlers.
//!
//! - [`CodeResponseTypeHandler`] - authorization code grant
//!   (RFC 6749 section 4.1)
//!
//! Persisting issued codes is up to the [`CodeIssuer`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::AuthResult;
use crate::oauth::authorize::{AuthorizationRequest, AuthorizationResponse};
use crate::oauth::dispatch::{HandlerOutcome, ResponseTypeHandler};
use crate::oauth::params::RawAuthorizeRequest;

/// Mints authorization codes.
#[async_trait]
pub trait CodeIssuer: Send + Sync {
    /// Issues a code bound to `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the code cannot be issued; the dispatch aborts.
    async fn issue_code(&self, request: &AuthorizationRequest) -> AuthResult<String>;
}

/// Issues 256-bit random codes without storing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeIssuer;

impl RandomCodeIssuer {
    /// Generates a cryptographically random code, base64url-encoded.
    #[must_use]
    pub fn generate_code() -> String {
        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

#[async_trait]
impl CodeIssuer for RandomCodeIssuer {
    async fn issue_code(&self, _request: &AuthorizationRequest) -> AuthResult<String> {
        Ok(Self::generate_code())
    }
}

/// Handles the `code` response type.
///
/// Responsible whenever `code` is among the requested response types, so
/// it composes with handlers for e.g. `id_token`. Appends `code`, and
/// `state` unless an earlier handler already did.
#[derive(Clone)]
pub struct CodeResponseTypeHandler {
    issuer: Arc<dyn CodeIssuer>,
}

impl CodeResponseTypeHandler {
    /// Creates a handler that uses the given issuer.
    #[must_use]
    pub fn new(issuer: Arc<dyn CodeIssuer>) -> Self {
        Self { issuer }
    }
}

impl Default for CodeResponseTypeHandler {
    fn default() -> Self {
        Self::new(Arc::new(RandomCodeIssuer))
    }
}

#[async_trait]
impl<S: Send + Sync> ResponseTypeHandler<S> for CodeResponseTypeHandler {
    fn name(&self) -> &str {
        "code"
    }

    async fn handle_response_type(
        &self,
        request: &AuthorizationRequest,
        _raw: &RawAuthorizeRequest,
        _session: &S,
        response: &mut AuthorizationResponse,
    ) -> AuthResult<HandlerOutcome> {
        if !request.response_types().has("code") {
            return Ok(HandlerOutcome::NotResponsible);
        }

        let code = self.issuer.issue_code(request).await?;
        response.add_query("code", code);
        if response.query_values("state").next().is_none() {
            response.add_query("state", request.state());
        }

        Ok(HandlerOutcome::Handled)
    }
}
