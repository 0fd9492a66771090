//! The wire-level collaborator.
//!
//! The core never opens a connection itself. Verb dispatch describes each
//! exchange as a plain [`Request`] value and hands it to a [`Transport`],
//! which returns a [`RawResponse`] with the status, headers and fully
//! buffered body. Connection pooling, TLS, redirect following and timeouts
//! all belong to the transport.
//!
//! Any `Fn(&Request) -> Result<RawResponse, TransportError>` closure is a
//! transport, which makes in-memory test doubles one line long:
//!
//! ```
//! use lensed::transport::{RawResponse, Request, Transport, TransportError};
//!
//! let echo = |request: &Request| -> Result<RawResponse, TransportError> {
//!     Ok(RawResponse::new(200, "OK").with_body(request.url.clone().into_bytes()))
//! };
//!
//! let request = Request::get("http://example.test/");
//! assert_eq!(echo.execute(&request).map(|raw| raw.body), Ok(b"http://example.test/".to_vec()));
//! ```

#[cfg(feature = "ureq")]
mod blocking;

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::multimap::Headers;
use crate::options::{Auth, Redirects};

#[cfg(feature = "ureq")]
pub use blocking::UreqTransport;

/// An HTTP request method.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `PATCH`
    Patch,
    /// `OPTIONS`
    Options,
    /// Any other method token.
    Custom(String),
}

impl Method {
    /// Returns the method token as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
            Self::Custom(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A fully resolved request, ready for the wire.
///
/// `url` already carries the serialized query string and `headers` already
/// carries the payload content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    /// The request method.
    pub method: Method,
    /// The absolute URL including the query string.
    pub url: String,
    /// Header fields to send.
    pub headers: Headers,
    /// The encoded body, if any.
    pub body: Option<Vec<u8>>,
    /// Credentials to attach.
    pub auth: Option<Auth>,
    /// Redirect policy.
    pub redirects: Redirects,
    /// Overall deadline for the exchange.
    pub timeout: Option<Duration>,
}

impl Request {
    /// Creates a request with no headers, body or credentials.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
            auth: None,
            redirects: Redirects::default(),
            timeout: None,
        }
    }

    /// Creates a `GET` request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }
}

/// What a transport hands back: status line, headers and the whole body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// The numeric status code.
    pub status_code: u16,
    /// The reason phrase. [`UreqTransport`] reports the canonical phrase for
    /// the code rather than the one on the wire.
    pub status_message: String,
    /// Header fields in wire order; repeated names appear repeatedly.
    pub headers: Vec<(String, String)>,
    /// The fully buffered body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response with no headers and an empty body.
    pub fn new(status_code: u16, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header field.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// Failures reported by a transport.
///
/// HTTP error statuses are not failures; they arrive as ordinary
/// [`RawResponse`] values.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The connection could not be established or was lost.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The exchange did not finish before the deadline.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The TLS handshake or certificate check failed.
    #[error("TLS failure: {0}")]
    Tls(String),

    /// The URL could not be parsed or has an unsupported scheme.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be built, e.g. a header value is not valid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An I/O error while reading or writing the exchange.
    #[error("I/O error: {0}")]
    Io(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

/// Executes requests on the wire.
///
/// Implementations must be shareable across threads; a [`Session`] hands the
/// same transport to many requests.
///
/// [`Session`]: crate::options::Session
pub trait Transport: Send + Sync {
    /// Performs `request` and buffers the whole response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no HTTP response could be obtained.
    fn execute(&self, request: &Request) -> Result<RawResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&Request) -> Result<RawResponse, TransportError> + Send + Sync,
{
    fn execute(&self, request: &Request) -> Result<RawResponse, TransportError> {
        self(request)
    }
}
