//! Request options, built through lenses.
//!
//! [`Options`] is an immutable record. Every change goes through an optic
//! and returns a new value, so option sets can be shared, reused and
//! specialized freely:
//!
//! ```
//! use lensed::options::{Auth, Options, auth, header, param};
//! use lensed::optics::{Getter, Setter};
//!
//! let base = Options::default();
//! let with_query = param("foo").set(base.clone(), vec!["bar".to_string(), "quux".to_string()]);
//! let opts = header("Accept").set(with_query, vec!["application/json".to_string()]);
//! let opts = auth().set(opts, Some(Auth::basic("user", "pass")));
//!
//! assert_eq!(param("foo").view(&opts), ["bar", "quux"]);
//! assert_eq!(header("accept").view(&opts), ["application/json"]);
//! assert!(param("foo").view(&base).is_empty());
//! ```
//!
//! # Multimap fields
//!
//! [`param`] and [`header`] focus the list of values under one key. A
//! missing key reads as an empty list, setting an empty list removes the
//! key, and setting a key to the list it already holds leaves the options
//! untouched. Any other set moves the key to the end, so the query string
//! follows the order keys were last set in.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::Lenses;
use crate::multimap::{self, CaseInsensitive, EntryAt, Exact, Headers, Params};
use crate::optics::{Composed, FieldLens, OpticExt};
use crate::transport::Transport;

/// Credentials attached to a request.
///
/// This is a descriptor only; the transport decides how to put it on the
/// wire.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// HTTP Basic credentials.
    Basic {
        /// The user name.
        user: String,
        /// The password.
        password: String,
    },
    /// A bearer token (OAuth 2 access token or similar).
    Bearer(String),
}

impl Auth {
    /// Creates Basic credentials.
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Creates a bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { user, .. } => formatter
                .debug_struct("Basic")
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
            Self::Bearer(_) => formatter.debug_tuple("Bearer").field(&"<redacted>").finish(),
        }
    }
}

/// What to do when the server answers with a redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Redirects {
    /// Follow up to `max_hops` redirects, then return the last response.
    Follow {
        /// The largest number of redirects to follow.
        max_hops: u32,
    },
    /// Return the redirect response itself.
    NoFollow,
}

impl Redirects {
    /// The number of hops followed by default.
    pub const DEFAULT_MAX_HOPS: u32 = 10;

    /// Returns how many hops this policy allows.
    #[must_use]
    pub const fn max_hops(self) -> u32 {
        match self {
            Self::Follow { max_hops } => max_hops,
            Self::NoFollow => 0,
        }
    }
}

impl Default for Redirects {
    fn default() -> Self {
        Self::Follow {
            max_hops: Self::DEFAULT_MAX_HOPS,
        }
    }
}

/// A shared handle to a transport and whatever connections it pools.
///
/// Cloning a session shares the transport. Two sessions are equal only when
/// they are clones of the same handle.
#[derive(Clone)]
pub struct Session(Arc<dyn Transport>);

impl Session {
    /// Wraps a transport in a new session.
    pub fn new<T>(transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self(Arc::new(transport))
    }

    /// Creates a session backed by a fresh [`UreqTransport`].
    ///
    /// [`UreqTransport`]: crate::transport::UreqTransport
    #[cfg(feature = "ureq")]
    #[must_use]
    pub fn ureq(config: &crate::config::TransportConfig) -> Self {
        Self::new(crate::transport::UreqTransport::new(config))
    }

    /// Returns the shared transport.
    pub fn transport(&self) -> &dyn Transport {
        self.0.as_ref()
    }
}

impl From<Arc<dyn Transport>> for Session {
    fn from(transport: Arc<dyn Transport>) -> Self {
        Self(transport)
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Eq for Session {}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Session")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// The configuration of one request.
///
/// Fields are reached through the lenses in this module; the record itself
/// has no setters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Lenses)]
pub struct Options {
    params: Params,
    headers: Headers,
    auth: Option<Auth>,
    redirects: Redirects,
    timeout: Option<Duration>,
    session: Option<Session>,
}

impl Options {
    /// Returns the query parameters.
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the header fields.
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the credentials.
    pub const fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    /// Returns the redirect policy.
    pub const fn redirects(&self) -> Redirects {
        self.redirects
    }

    /// Returns the timeout.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the session.
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

/// A lens on the values of one query parameter.
pub type ParamLens = Composed<FieldLens<Options, Params>, EntryAt<Exact>>;

/// A lens on the values of one header field.
pub type HeaderLens = Composed<FieldLens<Options, Headers>, EntryAt<CaseInsensitive>>;

/// Focuses every value of the query parameter `name` (case-sensitive).
pub fn param(name: impl Into<String>) -> ParamLens {
    Options::params_lens().compose(multimap::at::<Exact>(name))
}

/// Focuses every value of the header `name` (case-insensitive).
pub fn header(name: impl Into<String>) -> HeaderLens {
    Options::headers_lens().compose(multimap::at::<CaseInsensitive>(name))
}

/// Focuses all query parameters.
#[must_use]
pub fn params() -> FieldLens<Options, Params> {
    Options::params_lens()
}

/// Focuses all header fields.
#[must_use]
pub fn headers() -> FieldLens<Options, Headers> {
    Options::headers_lens()
}

/// Focuses the credentials.
#[must_use]
pub fn auth() -> FieldLens<Options, Option<Auth>> {
    Options::auth_lens()
}

/// Focuses the redirect policy.
#[must_use]
pub fn redirects() -> FieldLens<Options, Redirects> {
    Options::redirects_lens()
}

/// Focuses the timeout.
#[must_use]
pub fn timeout() -> FieldLens<Options, Option<Duration>> {
    Options::timeout_lens()
}

/// Focuses the session.
#[must_use]
pub fn session() -> FieldLens<Options, Option<Session>> {
    Options::session_lens()
}

static_assertions::assert_impl_all!(Options: Send, Sync, Clone);
static_assertions::assert_impl_all!(Session: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{Getter, Setter};
    use crate::transport::{RawResponse, Request, TransportError};

    fn ok_transport(_: &Request) -> Result<RawResponse, TransportError> {
        Ok(RawResponse::new(200, "OK"))
    }

    #[test]
    fn test_default_is_neutral() {
        let options = Options::default();
        assert!(options.params().is_empty());
        assert!(options.headers().is_empty());
        assert_eq!(options.auth(), None);
        assert_eq!(options.redirects(), Redirects::Follow { max_hops: 10 });
        assert_eq!(options.timeout(), None);
        assert!(options.session().is_none());
    }

    #[test]
    fn test_auth_debug_hides_secrets() {
        let rendered = format!("{:?}", Auth::basic("user", "hunter2"));
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
        assert!(!format!("{:?}", Auth::bearer("token-value")).contains("token-value"));
    }

    #[test]
    fn test_session_equality_is_identity() {
        let first = Session::new(ok_transport);
        let second = Session::new(ok_transport);
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[test]
    fn test_set_original_untouched() {
        let original = Options::default();
        let updated = redirects().set(original.clone(), Redirects::NoFollow);
        assert_eq!(redirects().view(&original), Redirects::default());
        assert_eq!(redirects().view(&updated), Redirects::NoFollow);
        assert_eq!(Redirects::NoFollow.max_hops(), 0);
    }
}
