//! Response type dispatch.
//!
//! A [`ResponseTypeDispatcher`] runs an ordered chain of
//! [`ResponseTypeHandler`]s against a validated request. Every handler is
//! run, in registration order, so several handlers can contribute to one
//! response (e.g. `code` and `id_token`). Handlers only ever append to the
//! shared [`AuthorizationResponse`].
//!
//! | Handler result | Effect |
//! |---|---|
//! | `Ok(Handled)` | recorded as a success, chain continues |
//! | `Ok(NotResponsible)` | ignored, chain continues |
//! | `Err(_)` | chain aborts, error returned |
//!
//! If the chain completes with no success the dispatch fails with
//! [`AuthError::NoResponseTypeHandlerFound`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::AuthResult;
use crate::error::AuthError;
use crate::oauth::authorize::{AuthorizationRequest, AuthorizationResponse};
use crate::oauth::params::RawAuthorizeRequest;

/// Outcome of a single handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The handler served (part of) the requested response types and wrote
    /// into the response.
    Handled,
    /// The handler is not responsible for the requested response types.
    NotResponsible,
}

/// A pluggable response type handler.
///
/// `S` is the caller's session type, passed through untouched.
///
/// # Example
///
/// ```ignore
/// struct TokenHandler;
///
/// #[async_trait]
/// impl ResponseTypeHandler for TokenHandler {
///     fn name(&self) -> &str { "token" }
///
///     async fn handle_response_type(
///         &self,
///         request: &AuthorizationRequest,
///         _raw: &RawAuthorizeRequest,
///         _session: &(),
///         response: &mut AuthorizationResponse,
///     ) -> AuthResult<HandlerOutcome> {
///         if !request.response_types().has("token") {
///             return Ok(HandlerOutcome::NotResponsible);
///         }
///         response.add_query("access_token", mint());
///         Ok(HandlerOutcome::Handled)
///     }
/// }
/// ```
#[async_trait]
pub trait ResponseTypeHandler<S = ()>: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Attempts to handle the request's response types.
    ///
    /// # Errors
    ///
    /// Any error aborts the dispatch and is returned to the caller.
    async fn handle_response_type(
        &self,
        request: &AuthorizationRequest,
        raw: &RawAuthorizeRequest,
        session: &S,
        response: &mut AuthorizationResponse,
    ) -> AuthResult<HandlerOutcome>;
}

/// Ordered chain of response type handlers.
pub struct ResponseTypeDispatcher<S = ()> {
    handlers: Vec<Arc<dyn ResponseTypeHandler<S>>>,
}

impl<S: Send + Sync> Default for ResponseTypeDispatcher<S> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<S: Send + Sync> ResponseTypeDispatcher<S> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to the end of the chain.
    #[must_use]
    pub fn with_handler(mut self, handler: impl ResponseTypeHandler<S> + 'static) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Appends a shared handler to the end of the chain.
    pub fn register(&mut self, handler: Arc<dyn ResponseTypeHandler<S>>) {
        self.handlers.push(handler);
    }

    /// Names of the registered handlers, in order.
    pub fn handler_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|h| h.name())
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs every handler in order and returns the accumulated response.
    ///
    /// Handlers run sequentially; a later handler sees what earlier ones
    /// wrote.
    ///
    /// # Errors
    ///
    /// - The first handler error, immediately
    /// - `NoResponseTypeHandlerFound` if no handler returned `Handled`
    pub async fn dispatch(
        &self,
        request: &AuthorizationRequest,
        raw: &RawAuthorizeRequest,
        session: &S,
    ) -> AuthResult<AuthorizationResponse> {
        let mut response = AuthorizationResponse::new();
        let mut found = false;

        for handler in &self.handlers {
            let outcome = handler
                .handle_response_type(request, raw, session, &mut response)
                .await
                .inspect_err(|e| {
                    tracing::debug!(
                        handler = handler.name(),
                        error = e.oauth_error_code(),
                        "Response type handler aborted dispatch"
                    );
                })?;

            tracing::trace!(handler = handler.name(), outcome = ?outcome, "Response type handler finished");

            if outcome == HandlerOutcome::Handled {
                found = true;
            }
        }

        if !found {
            return Err(AuthError::NoResponseTypeHandlerFound);
        }

        Ok(response)
    }
}
