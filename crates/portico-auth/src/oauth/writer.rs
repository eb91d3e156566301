//! Response writing.
//!
//! Translates a successful [`AuthorizationResponse`] or an [`AuthError`]
//! into an [`AuthorizeReply`], the transport-neutral outcome of the
//! endpoint. The HTTP adapter renders the reply.
//!
//! | Outcome | Reply |
//! |---|---|
//! | success | `302 Found`, parameters merged into the redirect URI |
//! | error, redirect URI verified | `302 Found` with `error` and `error_description` |
//! | error, redirect URI not verified | JSON body `{"error", "error_description"}` |

use axum::http::{HeaderMap, StatusCode};
use url::Url;

use crate::error::{AuthError, RfcError};
use crate::oauth::authorize::{AuthorizationRequest, AuthorizationResponse};
use crate::oauth::service::AuthorizeRejection;

/// The rendered outcome of an authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeReply {
    /// Redirect the user agent to `location` with `302 Found`.
    Redirect {
        /// The redirect URI with response parameters merged in.
        location: Url,
        /// Extra response headers.
        headers: HeaderMap,
    },

    /// Answer directly with a JSON error body.
    Json {
        /// HTTP status of the reply.
        status: StatusCode,
        /// Error body.
        body: RfcError,
    },
}

impl AuthorizeReply {
    /// HTTP status of the reply.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Redirect { .. } => StatusCode::FOUND,
            Self::Json { status, .. } => *status,
        }
    }

    /// The redirect target, if this reply is a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&Url> {
        match self {
            Self::Redirect { location, .. } => Some(location),
            Self::Json { .. } => None,
        }
    }
}

/// Writes a successful response.
///
/// The response's query parameters are appended to any query the
/// registered redirect URI already carries; existing parameters are kept.
#[must_use]
pub fn write_success(
    request: &AuthorizationRequest,
    response: &AuthorizationResponse,
) -> AuthorizeReply {
    let mut location = request.redirect_uri().clone();
    merge_query(&mut location, response.query().iter().map(|(k, v)| (k.as_str(), v.as_str())));

    AuthorizeReply::Redirect {
        location,
        headers: response.headers().clone(),
    }
}

/// Writes an error.
///
/// With a verified `redirect_uri` the error is delivered to the client as
/// query parameters. Without one the user agent gets a JSON body, since an
/// unverified URI must never be redirected to.
#[must_use]
pub fn write_error(redirect_uri: Option<&Url>, error: &AuthError) -> AuthorizeReply {
    let rfc = error.to_rfc_error();

    match redirect_uri {
        Some(uri) => {
            let mut location = uri.clone();
            merge_query(
                &mut location,
                [
                    ("error", rfc.error),
                    ("error_description", rfc.error_description),
                ],
            );
            AuthorizeReply::Redirect {
                location,
                headers: HeaderMap::new(),
            }
        }
        None => AuthorizeReply::Json {
            status: rfc.status,
            body: rfc,
        },
    }
}

/// Writes a rejection from the request builder.
#[must_use]
pub fn write_rejection(rejection: &AuthorizeRejection) -> AuthorizeReply {
    write_error(rejection.redirect_uri(), rejection.error())
}

fn merge_query<'a>(location: &mut Url, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
    let mut pairs = pairs.into_iter().peekable();
    if pairs.peek().is_none() {
        return;
    }

    let mut query = location.query_pairs_mut();
    for (key, value) in pairs {
        query.append_pair(key, value);
    }
}
