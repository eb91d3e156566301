//! Authorization endpoint request and response types.
//!
//! # OAuth 2.0 Authorization Flow
//!
//! 1. The inbound request is validated into an [`AuthorizationRequest`]
//! 2. Response type handlers fill an [`AuthorizationResponse`]
//! 3. The response is merged into the redirect URI and sent as `302 Found`
//!
//! # Example
//!
//! ```ignore
//! GET /oauth/authorize?
//!   response_type=code
//!   &client_id=my-app
//!   &redirect_uri=https://app.example.com/callback
//!   &scope=openid profile
//!   &state=abc123xyz789
//! ```

use std::fmt;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use indexmap::IndexSet;
use time::OffsetDateTime;
use url::Url;

use crate::oauth::params::AuthorizeParams;
use crate::types::Client;

// =============================================================================
// Arguments
// =============================================================================

/// An ordered set of space-delimited request arguments.
///
/// Used for `response_type` and `scope`. Duplicates are collapsed and the
/// first occurrence keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(IndexSet<String>);

impl Arguments {
    /// Splits `raw` on single spaces, discarding empty tokens.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.split(' ').filter(|token| !token.is_empty()).collect()
    }

    /// Returns `true` if `value` is in the set.
    #[must_use]
    pub fn has(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    /// Returns `true` if every one of `values` is in the set.
    #[must_use]
    pub fn has_all(&self, values: &[&str]) -> bool {
        values.iter().all(|value| self.has(value))
    }

    /// Returns `true` if the set contains exactly `values`, in any order.
    #[must_use]
    pub fn matches_exactly(&self, values: &[&str]) -> bool {
        self.len() == values.len() && self.has_all(values)
    }

    /// Iterates over the arguments in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of distinct arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no arguments were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Arguments {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arg in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(arg)?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Authorization Request
// =============================================================================

/// A validated authorization request.
///
/// Built once per inbound request by
/// [`AuthorizationService::new_authorize_request`](crate::oauth::AuthorizationService::new_authorize_request)
/// and immutable afterwards. Holding one implies:
///
/// - the client was found in the client store
/// - the redirect URI is registered, absolute and fragment-free
/// - the state meets the configured minimum length
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    requested_at: OffsetDateTime,
    client: Client,
    redirect_uri: Url,
    response_types: Arguments,
    state: String,
    scopes: Arguments,
    params: AuthorizeParams,
}

impl AuthorizationRequest {
    pub(crate) fn new(
        client: Client,
        redirect_uri: Url,
        response_types: Arguments,
        state: String,
        scopes: Arguments,
        params: AuthorizeParams,
    ) -> Self {
        Self {
            requested_at: OffsetDateTime::now_utc(),
            client,
            redirect_uri,
            response_types,
            state,
            scopes,
            params,
        }
    }

    /// When the request was received.
    #[must_use]
    pub fn requested_at(&self) -> OffsetDateTime {
        self.requested_at
    }

    /// The resolved client.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// The verified redirect URI.
    #[must_use]
    pub fn redirect_uri(&self) -> &Url {
        &self.redirect_uri
    }

    /// Requested response types, e.g. `code`.
    #[must_use]
    pub fn response_types(&self) -> &Arguments {
        &self.response_types
    }

    /// The client's CSRF state value.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Requested scopes.
    #[must_use]
    pub fn scopes(&self) -> &Arguments {
        &self.scopes
    }

    /// All decoded request parameters, for handlers that read extensions
    /// such as `nonce`.
    #[must_use]
    pub fn params(&self) -> &AuthorizeParams {
        &self.params
    }
}

// =============================================================================
// Authorization Response
// =============================================================================

/// Parameters and headers accumulated by response type handlers.
///
/// The response is append-only: handlers add query parameters and headers
/// but cannot remove or replace what an earlier handler wrote.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationResponse {
    query: Vec<(String, String)>,
    headers: HeaderMap,
}

impl AuthorizationResponse {
    /// Creates an empty response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter to be added to the redirect URI.
    pub fn add_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Appends a header to the outbound response.
    pub fn add_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    /// Accumulated query parameters, in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns every value recorded for `key`.
    pub fn query_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.query
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Accumulated headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
