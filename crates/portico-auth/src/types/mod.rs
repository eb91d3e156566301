//! Common types used across the authorization endpoint modules.
//!
//! ## Domain Types
//!
//! - [`Client`] - OAuth 2.0 client registration

pub mod client;

pub use client::{Client, ClientValidationError};
