//! Inbound authorization request parameters.
//!
//! Authorization requests arrive as `application/x-www-form-urlencoded`
//! data in the URL query and, for POST requests, in the body. This module
//! holds the unparsed inbound request and the strict form decoder used by
//! the request builder.

use std::borrow::Cow;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, header};
use percent_encoding::percent_decode_str;
use url::form_urlencoded;

use crate::AuthResult;
use crate::error::AuthError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An inbound authorization request before any validation.
///
/// This is the transport-neutral view the builder and the response type
/// handlers work from.
#[derive(Debug, Clone, Default)]
pub struct RawAuthorizeRequest {
    /// HTTP method.
    pub method: Method,
    /// Raw (still encoded) URL query, without the leading `?`.
    pub query: Option<String>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Raw request body.
    pub body: Bytes,
}

impl RawAuthorizeRequest {
    /// Creates a GET request carrying the given raw query.
    #[must_use]
    pub fn get(query: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Creates a form-encoded POST request carrying the given raw body.
    #[must_use]
    pub fn post_form(body: impl Into<Bytes>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static(FORM_CONTENT_TYPE),
        );
        Self {
            method: Method::POST,
            query: None,
            headers,
            body: body.into(),
        }
    }

    /// Parses the request's form parameters.
    ///
    /// Body parameters are only read for POST, PUT and PATCH requests with
    /// a form content type. They precede query parameters, so
    /// [`AuthorizeParams::get`] prefers the body value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if either part is malformed.
    pub fn parse_form(&self) -> AuthResult<AuthorizeParams> {
        let mut values = Vec::new();

        if self.has_form_body() {
            let body = std::str::from_utf8(&self.body)
                .map_err(|_| AuthError::invalid_request("Request body is not valid UTF-8"))?;
            parse_into(body, &mut values)?;
        }

        if let Some(query) = self.query.as_deref() {
            parse_into(query, &mut values)?;
        }

        Ok(AuthorizeParams { values })
    }

    fn has_form_body(&self) -> bool {
        if !matches!(self.method, Method::POST | Method::PUT | Method::PATCH) {
            return false;
        }
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
    }
}

/// Decoded, multi-valued form parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizeParams {
    values: Vec<(String, String)>,
}

impl AuthorizeParams {
    /// Builds parameters from already decoded pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the first value for `name`, or the empty string.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    }

    /// Returns every value for `name` in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over all pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` if no parameters were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Unescapes one form-encoded component.
///
/// `+` becomes a space and `%XX` is decoded. Exactly one level of decoding
/// is applied.
///
/// # Errors
///
/// Returns `InvalidRequest` for a truncated or non-hex escape, or when the
/// decoded bytes are not valid UTF-8.
pub fn unescape(value: &str) -> AuthResult<String> {
    check_escapes(value)?;
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| AuthError::invalid_request("Escaped value is not valid UTF-8"))
}

/// Rejects `%` not followed by two hex digits.
///
/// `form_urlencoded` and `percent_decode_str` pass such sequences through
/// verbatim.
fn check_escapes(raw: &str) -> AuthResult<()> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let well_formed = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(AuthError::invalid_request("Malformed percent escape"));
        }
    }
    Ok(())
}

fn parse_into(raw: &str, out: &mut Vec<(String, String)>) -> AuthResult<()> {
    if raw.contains(';') {
        return Err(AuthError::invalid_request(
            "Semicolon is not a valid parameter separator",
        ));
    }
    check_escapes(raw)?;

    out.extend(
        form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned())),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("a+b%20c").unwrap(), "a b c");
        assert_eq!(
            unescape("https%3A%2F%2Fapp.example%2Fcb").unwrap(),
            "https://app.example/cb"
        );
        assert_eq!(unescape("plain").unwrap(), "plain");
        assert_eq!(unescape("%C3%A9").unwrap(), "é");
    }

    #[test]
    fn test_unescape_rejects_malformed() {
        assert!(matches!(
            unescape("%zz"),
            Err(AuthError::InvalidRequest { .. })
        ));
        assert!(matches!(unescape("abc%2"), Err(AuthError::InvalidRequest { .. })));
        assert!(matches!(unescape("%FF"), Err(AuthError::InvalidRequest { .. })));
    }

    #[test]
    fn test_unescape_rejects_escape_split_by_another() {
        assert!(matches!(unescape("%2%41"), Err(AuthError::InvalidRequest { .. })));
        assert!(matches!(unescape("%"), Err(AuthError::InvalidRequest { .. })));
    }

    #[test]
    fn test_unescape_is_single_level() {
        assert_eq!(unescape("%2520").unwrap(), "%20");
    }

    #[test]
    fn test_parse_query() {
        let raw = RawAuthorizeRequest::get("client_id=c1&scope=a+b&state=abcdefgh&empty=&flag");
        let params = raw.parse_form().unwrap();

        assert_eq!(params.get("client_id"), "c1");
        assert_eq!(params.get("scope"), "a b");
        assert_eq!(params.get("empty"), "");
        assert_eq!(params.get("flag"), "");
        assert_eq!(params.get("missing"), "");
    }

    #[test]
    fn test_parse_skips_empty_segments() {
        let params = RawAuthorizeRequest::get("&&client_id=c1&&state=a%2Bb+c&")
            .parse_form()
            .unwrap();

        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("client_id", "c1"), ("state", "a+b c")]
        );
    }

    #[test]
    fn test_get_returns_first_value() {
        let params = AuthorizeParams::from_pairs([("scope", "a"), ("scope", "b")]);
        let name = String::from("scope");

        assert_eq!(params.get(&name), "a");
        assert_eq!(params.get("other"), "");
    }

    #[test]
    fn test_parse_repeated_values() {
        let params = RawAuthorizeRequest::get("a=1&a=2&b=3").parse_form().unwrap();

        assert_eq!(params.get("a"), "1");
        assert_eq!(params.get_all("a").collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_parse_rejects_bad_escape() {
        let result = RawAuthorizeRequest::get("client_id=%zz").parse_form();
        assert!(matches!(result, Err(AuthError::InvalidRequest { .. })));
    }

    #[test]
    fn test_parse_rejects_semicolon() {
        let result = RawAuthorizeRequest::get("client_id=c1;state=x").parse_form();
        assert!(matches!(result, Err(AuthError::InvalidRequest { .. })));
    }

    #[test]
    fn test_post_body_precedes_query() {
        let mut raw = RawAuthorizeRequest::post_form("client_id=from-body");
        raw.query = Some("client_id=from-query&state=abcdefgh".to_string());

        let params = raw.parse_form().unwrap();
        assert_eq!(params.get("client_id"), "from-body");
        assert_eq!(params.get("state"), "abcdefgh");
    }

    #[test]
    fn test_body_ignored_without_form_content_type() {
        let mut raw = RawAuthorizeRequest::post_form("client_id=from-body");
        raw.headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let params = raw.parse_form().unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_body_with_charset_parameter() {
        let mut raw = RawAuthorizeRequest::post_form("client_id=c1");
        raw.headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/x-www-form-urlencoded; charset=utf-8"),
        );

        assert_eq!(raw.parse_form().unwrap().get("client_id"), "c1");
    }

    #[test]
    fn test_body_ignored_for_get() {
        let mut raw = RawAuthorizeRequest::post_form("client_id=c1");
        raw.method = Method::GET;

        assert!(raw.parse_form().unwrap().is_empty());
    }

    #[test]
    fn test_non_utf8_body_rejected() {
        let raw = RawAuthorizeRequest::post_form(vec![0xff, 0xfe]);
        assert!(matches!(
            raw.parse_form(),
            Err(AuthError::InvalidRequest { .. })
        ));
    }
}
