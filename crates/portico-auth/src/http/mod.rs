//! HTTP handlers for the authorization endpoint.
//!
//! This module provides the Axum binding of
//! [`AuthorizeEndpoint`](crate::oauth::AuthorizeEndpoint).
//!
//! # Available Handlers
//!
//! - [`authorize`] - Authorization endpoint (RFC 6749 section 3.1)

pub mod authorize;

pub use authorize::{authorize_handler, authorize_router};
