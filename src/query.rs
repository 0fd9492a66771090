//! Query-string and form serialization.
//!
//! Keys and values are UTF-8 percent-encoded with every byte outside the
//! unreserved set (`A-Z a-z 0-9 - . _ ~`) escaped, so a space becomes `%20`
//! and never `+`.
//!
//! # Example
//!
//! ```
//! use lensed::multimap::Params;
//! use lensed::query;
//!
//! let params = Params::new()
//!     .append("foo", "bar")
//!     .append("foo", "quux")
//!     .append("q", "a b");
//!
//! assert_eq!(query::render(&params), "foo=bar&foo=quux&q=a%20b");
//! assert_eq!(
//!     query::append_to("http://httpbin.org/get", &params),
//!     "http://httpbin.org/get?foo=bar&foo=quux&q=a%20b",
//! );
//! ```

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::multimap::Params;

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes one key or value.
pub fn encode(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

/// Encodes `(key, value)` pairs as `key=value` joined by `&`.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| format!("{}={}", encode(name), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Renders `params` as a query string without the leading `?`.
///
/// Repeated values become repeated `key=value` pairs, in key order then list
/// order.
pub fn render(params: &Params) -> String {
    encode_pairs(params.pairs())
}

/// Appends `params` to `url`.
///
/// Uses `?` or `&` depending on whether `url` already carries a query and
/// keeps any `#fragment` at the end. Returns `url` unchanged when `params` is
/// empty.
pub fn append_to(url: &str, params: &Params) -> String {
    if params.is_empty() {
        return url.to_string();
    }

    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };

    let separator = if base.ends_with('?') || base.ends_with('&') {
        ""
    } else if base.contains('?') {
        "&"
    } else {
        "?"
    };

    let mut result = format!("{base}{separator}{}", render(params));
    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }
    result
}
