//! The authorization endpoint pipeline.
//!
//! ```text
//! RawAuthorizeRequest
//!     ├─► AuthorizationService::new_authorize_request
//!     │   └─► rejected → write_rejection (JSON or error redirect)
//!     ├─► ResponseTypeDispatcher::dispatch
//!     │   └─► failed → write_error to the verified redirect URI
//!     └─► write_success → 302 Found
//! ```

use crate::oauth::dispatch::ResponseTypeDispatcher;
use crate::oauth::params::RawAuthorizeRequest;
use crate::oauth::service::AuthorizationService;
use crate::oauth::writer::{AuthorizeReply, write_error, write_rejection, write_success};

/// Authorization endpoint: builder, dispatcher and writer in one.
///
/// Shared across requests; every call works on its own request and
/// response values.
pub struct AuthorizeEndpoint<S = ()> {
    service: AuthorizationService,
    dispatcher: ResponseTypeDispatcher<S>,
}

impl<S: Send + Sync> AuthorizeEndpoint<S> {
    /// Creates an endpoint from its parts.
    #[must_use]
    pub fn new(service: AuthorizationService, dispatcher: ResponseTypeDispatcher<S>) -> Self {
        Self {
            service,
            dispatcher,
        }
    }

    /// Handles one authorization request end to end.
    ///
    /// Never fails: every error is rendered into the reply.
    pub async fn handle(&self, raw: &RawAuthorizeRequest, session: &S) -> AuthorizeReply {
        let request = match self.service.new_authorize_request(raw).await {
            Ok(request) => request,
            Err(rejection) => {
                tracing::debug!(
                    error = rejection.error().oauth_error_code(),
                    redirect = rejection.is_redirect_uri_valid(),
                    "Authorization request rejected"
                );
                return write_rejection(&rejection);
            }
        };

        match self.dispatcher.dispatch(&request, raw, session).await {
            Ok(response) => {
                tracing::info!(
                    client_id = %request.client().client_id,
                    response_types = %request.response_types(),
                    "Authorization request granted"
                );
                write_success(&request, &response)
            }
            Err(e) => {
                if e.is_server_error() {
                    tracing::error!(client_id = %request.client().client_id, error = %e, "Response type dispatch failed");
                } else {
                    tracing::debug!(
                        client_id = %request.client().client_id,
                        error = e.oauth_error_code(),
                        "Response type dispatch failed"
                    );
                }
                write_error(Some(request.redirect_uri()), &e)
            }
        }
    }
}
