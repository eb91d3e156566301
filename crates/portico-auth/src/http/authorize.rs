//! OAuth 2.0 authorization endpoint handler.
//!
//! # Flow
//!
//! ```text
//! GET|POST /oauth/authorize
//!     ├─► Invalid client or redirect_uri → JSON error body (no redirect)
//!     ├─► Invalid state or dispatch failure → 302 with error=...
//!     └─► Success → 302 with response parameters
//! ```
//!
//! The caller's session, if any, is read from a request extension set by
//! upstream middleware; requests without one get `S::default()`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};

use crate::oauth::endpoint::AuthorizeEndpoint;
use crate::oauth::params::RawAuthorizeRequest;
use crate::oauth::writer::AuthorizeReply;

/// Path the endpoint is mounted on.
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

// =============================================================================
// Response rendering
// =============================================================================

impl IntoResponse for AuthorizeReply {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect {
                location,
                mut headers,
            } => match HeaderValue::from_str(location.as_str()) {
                Ok(value) => {
                    headers.insert(header::LOCATION, value);
                    (StatusCode::FOUND, headers).into_response()
                }
                Err(e) => {
                    tracing::error!(error = %e, "Redirect location is not a valid header value");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            },
            Self::Json { status, body } => (status, Json(body)).into_response(),
        }
    }
}

// =============================================================================
// Handler
// =============================================================================

/// GET/POST /oauth/authorize handler.
///
/// # Request
///
/// - GET with parameters in the query, or
/// - POST with `Content-Type: application/x-www-form-urlencoded`
///
/// # Response
///
/// - 302 Found: success, or an error delivered to the verified redirect URI
/// - 400/401/403/500 with a JSON body when no redirect URI could be verified
pub async fn authorize_handler<S>(
    State(endpoint): State<Arc<AuthorizeEndpoint<S>>>,
    session: Option<Extension<S>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    S: Clone + Default + Send + Sync + 'static,
{
    let raw = RawAuthorizeRequest {
        method,
        query: uri.query().map(str::to_owned),
        headers,
        body,
    };
    let session = session.map(|Extension(s)| s).unwrap_or_default();

    endpoint.handle(&raw, &session).await.into_response()
}

/// Builds a router serving the endpoint on [`AUTHORIZE_PATH`].
pub fn authorize_router<S>(endpoint: Arc<AuthorizeEndpoint<S>>) -> Router
where
    S: Clone + Default + Send + Sync + 'static,
{
    Router::new()
        .route(
            AUTHORIZE_PATH,
            get(authorize_handler::<S>).post(authorize_handler::<S>),
        )
        .with_state(endpoint)
}
