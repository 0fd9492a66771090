//! Optics over [`serde_json::Value`].
//!
//! Response bodies have no fixed shape, so every JSON optic is partial:
//!
//! - [`key`] and [`nth`] step into an object entry or array element
//! - [`as_string`], [`as_number`], [`as_f64`], [`as_i64`], [`as_bool`],
//!   [`as_array`] and [`as_object`] match one variant of the value
//! - [`values`] and [`members`] traverse every element of an array or
//!   every value of an object
//!
//! A miss anywhere in a chain yields `None` from `preview` and an empty
//! vector from `to_vec`; it never panics. Writes through a path that does
//! not exist return the document unchanged and never create keys.
//!
//! The `*_or` constructors ([`string_or`], [`number_or`], [`bool_or`],
//! [`array_or`], [`object_or`]) wrap a variant prism in
//! [`OrDefault`](crate::optics::OrDefault), so a whole chain ending in one of
//! them reads as a plain getter.
//!
//! # Example
//!
//! ```
//! use lensed::json::{as_string, key, members, number_or, string_or};
//! use lensed::optics::{AffineFold, Fold, Getter, OpticExt, Setter};
//! use serde_json::json;
//!
//! let body = json!({
//!     "args": { "foo": "bar" },
//!     "headers": { "Accept": "*/*", "Host": "httpbin.org" },
//!     "origin": "127.0.0.1",
//! });
//!
//! assert_eq!(key("origin").compose(string_or()).view(&body), "127.0.0.1");
//! assert_eq!(key("nope").compose(number_or()).view(&body), 0.0);
//! assert_eq!(key("args").compose(key("foo")).compose(as_string()).preview(&body), Some("bar".to_string()));
//!
//! let header_values = key("headers").compose(members()).compose(as_string());
//! assert_eq!(header_values.to_vec(&body), vec!["*/*", "httpbin.org"]);
//!
//! let shouted = header_values.over(body, |value| value.to_uppercase());
//! assert_eq!(shouted["headers"]["Host"], "HTTPBIN.ORG");
//! ```

mod prism;
mod traversal;

pub use prism::AsArray;
pub use prism::AsBool;
pub use prism::AsF64;
pub use prism::AsI64;
pub use prism::AsNumber;
pub use prism::AsObject;
pub use prism::AsString;
pub use prism::array_or;
pub use prism::as_array;
pub use prism::as_bool;
pub use prism::as_f64;
pub use prism::as_i64;
pub use prism::as_number;
pub use prism::as_object;
pub use prism::as_string;
pub use prism::bool_or;
pub use prism::number_or;
pub use prism::object_or;
pub use prism::string_or;

pub use traversal::Key;
pub use traversal::Members;
pub use traversal::Nth;
pub use traversal::Values;
pub use traversal::key;
pub use traversal::members;
pub use traversal::nth;
pub use traversal::values;
