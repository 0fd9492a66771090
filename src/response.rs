//! Responses and the lenses that read them.
//!
//! A [`Response`] is generic over its body so the same wrapper carries raw
//! bytes straight off the wire and, after decoding, a JSON tree or a typed
//! value. The lenses here work whatever state the body is in.
//!
//! # Example
//!
//! ```
//! use lensed::json::{key, string_or};
//! use lensed::optics::{Getter, OpticExt};
//! use lensed::response::{Response, Status, response_body, response_header, status_code};
//! use serde_json::json;
//!
//! let response = Response::new(Status::new(200, "OK"), Default::default(), json!({ "url": "http://x/get" }));
//!
//! assert_eq!(status_code().view(&response), 200);
//! assert!(response_header("content-type").view(&response).is_empty());
//!
//! let url = response_body().compose(key("url")).compose(string_or());
//! assert_eq!(url.view(&response), "http://x/get");
//! ```

use crate::Lenses;
use crate::multimap::{self, CaseInsensitive, EntryAt, Headers};
use crate::optics::{Composed, FieldLens, OpticExt};
use crate::transport::RawResponse;

/// A status code and its reason phrase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Lenses)]
pub struct Status {
    code: u16,
    message: String,
}

impl Status {
    /// Creates a status line.
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Returns the reason phrase.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` for `2xx` codes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code >= 200 && self.code < 300
    }
}

/// A received response whose body is in state `B`.
#[derive(Clone, Debug, PartialEq, Eq, Lenses)]
pub struct Response<B> {
    status: Status,
    headers: Headers,
    body: B,
}

impl<B> Response<B> {
    /// Assembles a response.
    pub const fn new(status: Status, headers: Headers, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the status line.
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Returns the header fields.
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the body.
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consumes the response, returning its body.
    pub fn into_body(self) -> B {
        self.body
    }

    /// Returns the `Content-Type` header, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.first("content-type")
    }

    /// Replaces the body by transforming it, keeping status and headers.
    pub fn map_body<C, F>(self, function: F) -> Response<C>
    where
        F: FnOnce(B) -> C,
    {
        Response {
            status: self.status,
            headers: self.headers,
            body: function(self.body),
        }
    }

    /// Like [`map_body`](Self::map_body), for transformations that can fail.
    ///
    /// # Errors
    ///
    /// Returns whatever error `function` returns.
    pub fn try_map_body<C, E, F>(self, function: F) -> Result<Response<C>, E>
    where
        F: FnOnce(B) -> Result<C, E>,
    {
        let body = function(self.body)?;
        Ok(Response {
            status: self.status,
            headers: self.headers,
            body,
        })
    }
}

impl From<RawResponse> for Response<Vec<u8>> {
    fn from(raw: RawResponse) -> Self {
        Self {
            status: Status::new(raw.status_code, raw.status_message),
            headers: raw.headers.into_iter().collect(),
            body: raw.body,
        }
    }
}

/// Focuses the status line.
#[must_use]
pub fn response_status<B>() -> FieldLens<Response<B>, Status> {
    Response::status_lens()
}

/// Focuses the header fields.
#[must_use]
pub fn response_headers<B>() -> FieldLens<Response<B>, Headers> {
    Response::headers_lens()
}

/// Focuses the body, in whatever state it is.
#[must_use]
pub fn response_body<B>() -> FieldLens<Response<B>, B> {
    Response::body_lens()
}

/// Focuses the numeric status code.
#[must_use]
pub fn status_code<B>() -> Composed<FieldLens<Response<B>, Status>, FieldLens<Status, u16>> {
    response_status().compose(Status::code_lens())
}

/// Focuses the reason phrase.
#[must_use]
pub fn status_message<B>() -> Composed<FieldLens<Response<B>, Status>, FieldLens<Status, String>> {
    response_status().compose(Status::message_lens())
}

/// Focuses every value of the header `name` (case-insensitive).
pub fn response_header<B>(
    name: impl Into<String>,
) -> Composed<FieldLens<Response<B>, Headers>, EntryAt<CaseInsensitive>> {
    response_headers().compose(multimap::at::<CaseInsensitive>(name))
}
