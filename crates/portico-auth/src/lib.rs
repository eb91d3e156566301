//! # portico-auth
//!
//! OAuth 2.0 authorization endpoint core.
//!
//! This crate provides:
//! - Authorization request validation with strict redirect URI matching
//! - A pluggable chain of response type handlers
//! - Success and error rendering as redirects or JSON bodies
//! - An Axum binding for the endpoint
//!
//! ## Modules
//!
//! - [`config`] - Endpoint configuration
//! - [`error`] - Error taxonomy and its RFC 6749 wire mapping
//! - [`oauth`] - Request builder, dispatcher and response writer
//! - [`storage`] - Client store trait and an in-memory implementation
//! - [`types`] - Client registration types
//! - [`http`] - Axum handler and router

pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod storage;
pub mod types;

pub use config::{AuthorizeConfig, ConfigError, MIN_STATE_LENGTH};
pub use error::{AuthError, RfcError};
pub use http::{authorize_handler, authorize_router};
pub use oauth::{
    AuthorizationRequest, AuthorizationResponse, AuthorizationService, AuthorizeEndpoint,
    AuthorizeRejection, AuthorizeReply, CodeResponseTypeHandler, HandlerOutcome,
    RawAuthorizeRequest, ResponseTypeDispatcher, ResponseTypeHandler,
};
pub use storage::{ClientStorage, MemoryClientStorage};
pub use types::{Client, ClientValidationError};

/// Type alias for authorization endpoint results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use portico_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::config::{AuthorizeConfig, ConfigError};
    pub use crate::error::{AuthError, RfcError};
    pub use crate::http::{authorize_handler, authorize_router};
    pub use crate::oauth::{
        Arguments, AuthorizationRequest, AuthorizationResponse, AuthorizationService,
        AuthorizeEndpoint, AuthorizeParams, AuthorizeRejection, AuthorizeReply, CodeIssuer,
        CodeResponseTypeHandler, HandlerOutcome, RandomCodeIssuer, RawAuthorizeRequest,
        ResponseTypeDispatcher, ResponseTypeHandler,
    };
    pub use crate::storage::{ClientStorage, MemoryClientStorage};
    pub use crate::types::{Client, ClientValidationError};
}
