//! # lensed
//!
//! An HTTP client whose request options and response bodies are built and
//! read through composable optics.
//!
//! ## Overview
//!
//! - **Optics**: getters, affine folds, folds and setters that compose into
//!   chains whose capability is the intersection of their stages
//! - **JSON optics**: `key`, `nth`, `values`, `members` and variant prisms for
//!   navigating untyped response bodies without panics
//! - **Options**: an immutable request configuration edited through lenses
//!   (`param`, `header`, `auth`, `redirects`, `timeout`, `session`)
//! - **Responses**: a body-generic wrapper with lenses for status, headers and
//!   body, plus typed decoding with distinct failure kinds
//! - **Dispatch**: `get`, `post`, `put`, `delete`, `head`, `patch` and
//!   `options`, each with a `*_with` variant taking explicit options
//!
//! ## Feature Flags
//!
//! - `ureq`: the default blocking transport (enabled by default)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```no_run
//! use lensed::prelude::*;
//!
//! let opts = param("foo").set(Options::default(), vec!["bar".to_string(), "quux".to_string()]);
//! let response = decode_json(get_with(&opts, "http://httpbin.org/get")?)?;
//!
//! let foo = response_body().compose(key("args")).compose(key("foo")).compose(values()).compose(as_string());
//! assert_eq!(foo.to_vec(&response), vec!["bar", "quux"]);
//!
//! let origin = response_body().compose(key("origin")).compose(string_or());
//! println!("origin: {}", origin.view(&response));
//! # Ok::<(), lensed::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

extern crate self as lensed;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types, traits and optic constructors.
///
/// # Usage
///
/// ```rust
/// use lensed::prelude::*;
/// ```
pub mod prelude {
    pub use crate::decode::{DecodeError, decode_as, decode_json};
    pub use crate::dispatch::{
        Payload, delete, delete_with, get, get_with, head, head_with, options, options_with,
        patch, patch_with, post, post_with, put, put_with, request,
    };
    pub use crate::error::Error;
    pub use crate::json::*;
    pub use crate::optics::{
        AffineFold, Fold, Getter, Optic, OpticExt, Review, Setter, identity,
    };
    pub use crate::options::{
        Auth, Options, Redirects, Session, auth, header, param, redirects, session, timeout,
    };
    pub use crate::response::{
        Response, Status, response_body, response_header, response_headers, response_status,
        status_code, status_message,
    };
    pub use crate::transport::{Method, Transport, TransportError};
}

pub mod config;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod json;
pub mod multimap;
pub mod optics;
pub mod options;
pub mod query;
pub mod response;
pub mod transport;

pub use error::Error;
pub use lensed_derive::Lenses;
