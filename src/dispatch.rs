//! Verb dispatch.
//!
//! Each function serializes the query parameters into the URL, merges the
//! payload's content type into the headers and hands the resulting
//! [`Request`] to a transport: the options' [`Session`](crate::options::Session)
//! when there is one, otherwise a process-wide default transport built once
//! from [`TransportConfig::from_env_or_default`](crate::config::TransportConfig::from_env_or_default).
//! Calls block until the whole response body is buffered.
//!
//! # Example
//!
//! ```
//! use lensed::dispatch::{Payload, post_with};
//! use lensed::optics::Setter;
//! use lensed::options::{Options, Session, param, session};
//! use lensed::transport::{RawResponse, Request, TransportError};
//! use serde_json::json;
//!
//! let recorder = Session::new(|request: &Request| -> Result<RawResponse, TransportError> {
//!     Ok(RawResponse::new(200, "OK").with_body(request.url.clone()))
//! });
//!
//! let opts = param("q").set(Options::default(), vec!["a b".to_string()]);
//! let opts = session().set(opts, Some(recorder));
//!
//! let response = post_with(&opts, "http://example.test/post", Payload::json(json!({ "x": 1 })))?;
//! assert_eq!(response.body().as_slice(), b"http://example.test/post?q=a%20b");
//! # Ok::<(), lensed::transport::TransportError>(())
//! ```

#[cfg(feature = "ureq")]
use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[cfg(feature = "ureq")]
use crate::config::TransportConfig;
use crate::options::Options;
use crate::query;
use crate::response::Response;
#[cfg(feature = "ureq")]
use crate::transport::UreqTransport;
use crate::transport::{Method, RawResponse, Request, Transport, TransportError};

/// A request body and the content type it is sent with.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Payload {
    /// No body.
    #[default]
    Empty,
    /// Raw bytes with an explicit content type.
    Bytes {
        /// The `Content-Type` to send.
        content_type: String,
        /// The body bytes.
        data: Vec<u8>,
    },
    /// A JSON document, sent as `application/json`.
    Json(Value),
    /// Form fields, sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

impl Payload {
    /// Creates a JSON payload.
    #[must_use]
    pub const fn json(value: Value) -> Self {
        Self::Json(value)
    }

    /// Creates a JSON payload from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if `value` cannot be represented as
    /// JSON.
    pub fn serialize<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Json)
    }

    /// Creates a form payload.
    pub fn form<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Creates a raw payload.
    pub fn bytes(content_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes {
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Returns the content type this payload is sent with.
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Bytes { content_type, .. } => Some(content_type.as_str()),
            Self::Json(_) => Some("application/json"),
            Self::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }

    fn into_body(self) -> Option<Vec<u8>> {
        match self {
            Self::Empty => None,
            Self::Bytes { data, .. } => Some(data),
            Self::Json(value) => Some(value.to_string().into_bytes()),
            Self::Form(fields) => Some(
                query::encode_pairs(
                    fields
                        .iter()
                        .map(|(name, value)| (name.as_str(), value.as_str())),
                )
                .into_bytes(),
            ),
        }
    }
}

/// Builds the wire request for `method` and `url` under `options`.
pub fn prepare(method: Method, url: &str, options: &Options, payload: Payload) -> Request {
    let mut headers = options.headers().clone();
    if let Some(content_type) = payload.content_type()
        && !headers.contains("content-type")
    {
        headers = headers.append("Content-Type", content_type);
    }

    Request {
        method,
        url: query::append_to(url, options.params()),
        headers,
        body: payload.into_body(),
        auth: options.auth().cloned(),
        redirects: options.redirects(),
        timeout: options.timeout(),
    }
}

#[cfg(feature = "ureq")]
static DEFAULT_TRANSPORT: OnceLock<UreqTransport> = OnceLock::new();

/// The transport shared by every request without a session.
#[cfg(feature = "ureq")]
fn shared_transport() -> &'static UreqTransport {
    DEFAULT_TRANSPORT
        .get_or_init(|| UreqTransport::new(&TransportConfig::from_env_or_default()))
}

fn default_transport() -> Result<&'static dyn Transport, TransportError> {
    #[cfg(feature = "ureq")]
    {
        let transport: &'static dyn Transport = shared_transport();
        Ok(transport)
    }
    #[cfg(not(feature = "ureq"))]
    {
        Err(TransportError::Other(
            "no session configured and the default transport is disabled".to_string(),
        ))
    }
}

/// Sends a request and buffers the response.
///
/// # Errors
///
/// Returns the [`TransportError`] reported by the transport. HTTP error
/// statuses are not errors.
pub fn request(
    method: Method,
    url: &str,
    options: &Options,
    payload: Payload,
) -> Result<Response<Vec<u8>>, TransportError> {
    let request = prepare(method, url, options, payload);
    debug!(method = %request.method, url = %request.url, "sending request");

    let raw: RawResponse = match options.session() {
        Some(session) => session.transport().execute(&request),
        None => default_transport()?.execute(&request),
    }
    .inspect_err(|error| debug!(%error, url = %request.url, "request failed"))?;

    debug!(
        status = raw.status_code,
        bytes = raw.body.len(),
        url = %request.url,
        "received response"
    );
    Ok(Response::from(raw))
}

macro_rules! bodiless_verbs {
    ($($(#[$meta:meta])* $verb:ident, $verb_with:ident => $method:ident;)*) => {
        $(
            $(#[$meta])*
            ///
            /// # Errors
            ///
            /// Returns the [`TransportError`] reported by the transport.
            pub fn $verb(url: &str) -> Result<Response<Vec<u8>>, TransportError> {
                $verb_with(&Options::default(), url)
            }

            #[doc = concat!("[`", stringify!($verb), "`] with explicit options.")]
            ///
            /// # Errors
            ///
            /// Returns the [`TransportError`] reported by the transport.
            pub fn $verb_with(options: &Options, url: &str) -> Result<Response<Vec<u8>>, TransportError> {
                request(Method::$method, url, options, Payload::Empty)
            }
        )*
    };
}

macro_rules! body_verbs {
    ($($(#[$meta:meta])* $verb:ident, $verb_with:ident => $method:ident;)*) => {
        $(
            $(#[$meta])*
            ///
            /// # Errors
            ///
            /// Returns the [`TransportError`] reported by the transport.
            pub fn $verb(url: &str, payload: Payload) -> Result<Response<Vec<u8>>, TransportError> {
                $verb_with(&Options::default(), url, payload)
            }

            #[doc = concat!("[`", stringify!($verb), "`] with explicit options.")]
            ///
            /// # Errors
            ///
            /// Returns the [`TransportError`] reported by the transport.
            pub fn $verb_with(
                options: &Options,
                url: &str,
                payload: Payload,
            ) -> Result<Response<Vec<u8>>, TransportError> {
                request(Method::$method, url, options, payload)
            }
        )*
    };
}

bodiless_verbs! {
    /// Sends a `GET` request with default options.
    get, get_with => Get;
    /// Sends a `DELETE` request with default options.
    delete, delete_with => Delete;
    /// Sends a `HEAD` request with default options.
    head, head_with => Head;
    /// Sends an `OPTIONS` request with default options.
    options, options_with => Options;
}

body_verbs! {
    /// Sends a `POST` request with default options.
    post, post_with => Post;
    /// Sends a `PUT` request with default options.
    put, put_with => Put;
    /// Sends a `PATCH` request with default options.
    patch, patch_with => Patch;
}
