//! Redirect URI resolution.
//!
//! Resolves the `redirect_uri` of an authorization request against the
//! client's registered URIs.
//!
//! # Rules
//!
//! - RFC 6749 3.1.2.3: if multiple redirect URIs are registered, the client
//!   must send one, and it is compared with simple string comparison
//!   (RFC 3986 6.2.1). No normalization, case folding or trailing slash
//!   tolerance is applied.
//! - RFC 6749 3.1.2: the redirect URI must be absolute and hierarchical and
//!   must not carry a fragment. Registration does not exempt a URI from this check.

use url::Url;

use crate::AuthResult;
use crate::error::AuthError;
use crate::oauth::params::{AuthorizeParams, unescape};
use crate::types::Client;

/// Extracts the raw `redirect_uri` without validating it.
///
/// The value is unescaped once more after form decoding, since the endpoint
/// URI may itself carry an encoded query component (RFC 6749 3.1).
///
/// # Errors
///
/// Returns `InvalidRequest` if the value cannot be unescaped.
pub fn redirect_uri_from_params(params: &AuthorizeParams) -> AuthResult<String> {
    unescape(params.get("redirect_uri"))
}

/// Matches a requested redirect URI against the client's registrations.
///
/// - An empty `raw` resolves to the client's only registered URI, if it has
///   exactly one.
/// - A non-empty `raw` must equal one registered URI byte for byte.
///
/// Either way the resolved URI must also pass [`is_valid_redirect_uri`].
///
/// # Errors
///
/// Returns `InvalidRequest` for every other combination.
pub fn match_redirect_uri(raw: &str, client: &Client) -> AuthResult<Url> {
    let candidate = match (raw.is_empty(), client.redirect_uris()) {
        (true, [only]) => only.as_str(),
        (true, _) => {
            return Err(AuthError::invalid_request(
                "redirect_uri is required when the client has not registered exactly one",
            ));
        }
        (false, _) if client.is_redirect_uri_registered(raw) => raw,
        (false, _) => {
            return Err(AuthError::invalid_request(
                "redirect_uri is not registered for this client",
            ));
        }
    };

    let parsed = Url::parse(candidate)
        .map_err(|e| AuthError::invalid_request(format!("redirect_uri is malformed: {e}")))?;

    if !is_valid_redirect_uri(&parsed) {
        return Err(AuthError::invalid_request(
            "redirect_uri must be an absolute hierarchical URI without a fragment",
        ));
    }

    Ok(parsed)
}

/// Checks that a parsed redirect URI may be redirected to.
///
/// The URI must be hierarchical (`scheme:/...` or `scheme://...`); opaque
/// forms such as `javascript:...`, `data:...` or `urn:...` are rejected.
/// Any fragment component is rejected, including an empty one (`...#`).
/// This is deliberately stricter than parsers that read a bare trailing `#`
/// as no fragment at all.
#[must_use]
pub fn is_valid_redirect_uri(uri: &Url) -> bool {
    !uri.cannot_be_a_base() && uri.fragment().is_none()
}
