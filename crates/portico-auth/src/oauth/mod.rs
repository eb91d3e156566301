//! OAuth 2.0 authorization endpoint.
//!
//! The endpoint is split into four stages:
//!
//! - [`service`] - validates an inbound request into an [`AuthorizationRequest`]
//! - [`redirect_uri`] - resolves the redirect URI against the client's registrations
//! - [`dispatch`] - runs the registered [`ResponseTypeHandler`]s
//! - [`writer`] - renders success or failure as an [`AuthorizeReply`]
//!
//! [`endpoint::AuthorizeEndpoint`] chains them.
//!
//! # Example
//!
//! ```ignore
//! use portico_auth::oauth::{
//!     AuthorizationService, AuthorizeEndpoint, CodeResponseTypeHandler,
//!     RawAuthorizeRequest, ResponseTypeDispatcher,
//! };
//!
//! let service = AuthorizationService::new(client_storage, AuthorizeConfig::default());
//! let dispatcher = ResponseTypeDispatcher::new()
//!     .with_handler(CodeResponseTypeHandler::default());
//! let endpoint = AuthorizeEndpoint::new(service, dispatcher);
//!
//! let reply = endpoint.handle(&RawAuthorizeRequest::get(query), &()).await;
//! ```

pub mod authorize;
pub mod dispatch;
pub mod endpoint;
pub mod handlers;
pub mod params;
pub mod redirect_uri;
pub mod service;
pub mod writer;

// Request and response types
pub use authorize::{Arguments, AuthorizationRequest, AuthorizationResponse};

// Inbound parameters
pub use params::{AuthorizeParams, RawAuthorizeRequest, unescape};

// Redirect URI resolution
pub use redirect_uri::{is_valid_redirect_uri, match_redirect_uri, redirect_uri_from_params};

// Request builder
pub use service::{AuthorizationService, AuthorizeRejection};

// Dispatch
pub use dispatch::{HandlerOutcome, ResponseTypeDispatcher, ResponseTypeHandler};
pub use handlers::{CodeIssuer, CodeResponseTypeHandler, RandomCodeIssuer};

// Writer
pub use endpoint::AuthorizeEndpoint;
pub use writer::{AuthorizeReply, write_error, write_rejection, write_success};
