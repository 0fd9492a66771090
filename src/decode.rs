//! Typed decoding of response bodies.
//!
//! Decoding runs in stages so the caller can tell a malformed document from
//! a well-formed one of the wrong shape:
//!
//! 1. the `Content-Type` must name JSON, otherwise
//!    [`DecodeError::NotJsonContentType`]
//! 2. the bytes must parse as JSON, otherwise [`DecodeError::ParseFailure`]
//! 3. the JSON tree must deserialize into the target type, otherwise
//!    [`DecodeError::SchemaMismatch`]
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use lensed::decode::{DecodeError, decode_as};
//! use lensed::response::Response;
//! use lensed::transport::RawResponse;
//!
//! let raw = RawResponse::new(200, "OK")
//!     .with_header("Content-Type", "application/json; charset=utf-8")
//!     .with_body(r#"{"a": "1", "b": "2"}"#);
//!
//! let decoded = decode_as::<BTreeMap<String, String>>(Response::from(raw.clone()))?;
//! assert_eq!(decoded.body().len(), 2);
//!
//! let wrong_shape = decode_as::<Vec<String>>(Response::from(raw));
//! assert!(matches!(wrong_shape, Err(DecodeError::SchemaMismatch(_))));
//! # Ok::<(), DecodeError>(())
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::response::Response;

/// Why a body could not be decoded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The response does not declare a JSON content type. Carries the
    /// declared type, or an empty string when there is none.
    #[error("response content type is not JSON: {0:?}")]
    NotJsonContentType(String),

    /// The body is not syntactically valid JSON.
    #[error("response body is not valid JSON: {0}")]
    ParseFailure(String),

    /// The body is valid JSON but does not fit the requested type.
    #[error("response body does not match the expected shape: {0}")]
    SchemaMismatch(String),
}

/// Returns `true` if `content_type` names a JSON media type.
///
/// Accepts `application/json`, `text/json` and any `application/*+json`
/// subtype. Parameters such as `charset` are ignored and the comparison is
/// case-insensitive.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.split_once('/') {
        Some(("application" | "text", "json")) => true,
        Some(("application", subtype)) => subtype.len() > "+json".len() && subtype.ends_with("+json"),
        _ => false,
    }
}

/// Parses the body into a JSON tree for navigation with
/// [`json`](crate::json) optics.
///
/// # Errors
///
/// Returns [`DecodeError::NotJsonContentType`] or
/// [`DecodeError::ParseFailure`].
pub fn decode_json(response: Response<Vec<u8>>) -> Result<Response<Value>, DecodeError> {
    let content_type = response.content_type().unwrap_or_default();
    if !is_json_content_type(content_type) {
        debug!(content_type, "refusing to decode non-JSON response");
        return Err(DecodeError::NotJsonContentType(content_type.to_string()));
    }

    response.try_map_body(|bytes| {
        serde_json::from_slice::<Value>(&bytes).map_err(|error| {
            warn!(%error, "response body is not valid JSON");
            DecodeError::ParseFailure(error.to_string())
        })
    })
}

/// Decodes the body into `T`.
///
/// # Errors
///
/// Returns [`DecodeError::NotJsonContentType`] when the content type is not
/// JSON, [`DecodeError::ParseFailure`] when the body is not valid JSON and
/// [`DecodeError::SchemaMismatch`] when it does not fit `T`.
pub fn decode_as<T>(response: Response<Vec<u8>>) -> Result<Response<T>, DecodeError>
where
    T: DeserializeOwned,
{
    decode_json(response)?.try_map_body(|value| {
        serde_json::from_value::<T>(value).map_err(|error| {
            warn!(%error, target_type = std::any::type_name::<T>(), "response body has the wrong shape");
            DecodeError::SchemaMismatch(error.to_string())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("application/json", true)]
    #[case("Application/JSON; charset=UTF-8", true)]
    #[case("text/json", true)]
    #[case("application/problem+json", true)]
    #[case("application/+json", false)]
    #[case("text/html", false)]
    #[case("application/jsonp", false)]
    #[case("", false)]
    fn test_is_json_content_type(#[case] content_type: &str, #[case] expected: bool) {
        assert_eq!(is_json_content_type(content_type), expected);
    }
}
