//! Ordered string multimaps for query parameters and headers.
//!
//! A [`Multimap`] keeps its keys in the order they were last set and each
//! key's values in the order they were given. Key comparison is chosen by
//! the [`KeyMatch`] marker: [`Params`] compare keys exactly, [`Headers`]
//! compare them ASCII-case-insensitively.
//!
//! # Replacement policy
//!
//! [`Multimap::with`] replaces a key's whole list:
//!
//! - an empty list removes the key
//! - a list equal to the current one leaves the map untouched
//! - any other list removes the key and appends it at the end
//!
//! # Example
//!
//! ```
//! use lensed::multimap::{Headers, Params};
//!
//! let params = Params::new()
//!     .with("foo", vec!["bar".to_string()])
//!     .append("foo", "quux");
//! assert_eq!(params.get_all("foo"), ["bar", "quux"]);
//! assert!(params.get_all("Foo").is_empty());
//!
//! let headers = Headers::new().append("Accept", "application/json");
//! assert_eq!(headers.first("accept"), Some("application/json"));
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::optics::{AffineFold, Fold, Getter, Optic, Setter, Strict};

/// Decides whether a stored key matches a looked-up key.
pub trait KeyMatch: Clone + Copy + Default + fmt::Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Returns `true` when `stored` and `wanted` name the same entry.
    fn matches(stored: &str, wanted: &str) -> bool;
}

/// Byte-for-byte key comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Exact;

impl KeyMatch for Exact {
    fn matches(stored: &str, wanted: &str) -> bool {
        stored == wanted
    }
}

/// ASCII-case-insensitive key comparison, as HTTP header names require.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaseInsensitive;

impl KeyMatch for CaseInsensitive {
    fn matches(stored: &str, wanted: &str) -> bool {
        stored.eq_ignore_ascii_case(wanted)
    }
}

/// An insertion-ordered `key -> [value]` map.
#[derive(Clone, PartialEq, Eq)]
pub struct Multimap<M: KeyMatch> {
    entries: Vec<(String, Vec<String>)>,
    _match: PhantomData<M>,
}

/// Query parameters: case-sensitive keys.
pub type Params = Multimap<Exact>;

/// Header fields: case-insensitive names.
pub type Headers = Multimap<CaseInsensitive>;

impl<M: KeyMatch> Multimap<M> {
    /// Creates an empty multimap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            _match: PhantomData,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(stored, _)| M::matches(stored, name))
    }

    /// Returns every value under `name`, or an empty slice.
    pub fn get_all(&self, name: &str) -> &[String] {
        match self.entries.iter().find(|(stored, _)| M::matches(stored, name)) {
            Some((_, values)) => values.as_slice(),
            None => &[],
        }
    }

    /// Returns the first value under `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// Returns `true` if `name` has at least one value.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Replaces every value under `name` with `values`.
    ///
    /// See the module documentation for how empty and unchanged lists are
    /// handled.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        let name = name.into();
        let position = self.position(&name);

        if let Some(index) = position
            && self.entries[index].1 == values
        {
            return self;
        }
        if let Some(index) = position {
            self.entries.remove(index);
        }
        if !values.is_empty() {
            self.entries.push((name, values));
        }
        self
    }

    /// Adds `value` after any existing values under `name`.
    #[must_use]
    pub fn append(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        match self.position(&name) {
            Some(index) => self.entries[index].1.push(value.into()),
            None => self.entries.push((name, vec![value.into()])),
        }
        self
    }

    /// Removes `name` and its values.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.entries.retain(|(stored, _)| !M::matches(stored, name));
        self
    }

    /// Iterates over keys and their value lists, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Iterates over every `(key, value)` pair, in key order then value
    /// order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(name, values)| {
            values
                .iter()
                .map(move |value| (name.as_str(), value.as_str()))
        })
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: KeyMatch> Default for Multimap<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: KeyMatch> fmt::Debug for Multimap<M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<M, K, V> FromIterator<(K, V)> for Multimap<M>
where
    M: KeyMatch,
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterator: I) -> Self {
        iterator
            .into_iter()
            .fold(Self::new(), |map, (name, value)| map.append(name, value))
    }
}

/// A lens focusing the value list under one key of a [`Multimap`].
///
/// Viewing a missing key yields an empty list; setting follows
/// [`Multimap::with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryAt<M: KeyMatch> {
    name: String,
    _match: PhantomData<M>,
}

impl<M: KeyMatch> EntryAt<M> {
    /// Creates a lens for the entry under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _match: PhantomData,
        }
    }

    /// Returns the key this lens focuses.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Returns a lens for the value list under `name`.
pub fn at<M: KeyMatch>(name: impl Into<String>) -> EntryAt<M> {
    EntryAt::new(name)
}

impl<M: KeyMatch> Optic for EntryAt<M> {
    type Source = Multimap<M>;
    type Focus = Vec<String>;
}

impl<M: KeyMatch> Strict for EntryAt<M> {}

impl<M: KeyMatch> Getter for EntryAt<M> {
    fn view(&self, source: &Multimap<M>) -> Vec<String> {
        source.get_all(&self.name).to_vec()
    }
}

impl<M: KeyMatch> AffineFold for EntryAt<M> {
    fn preview(&self, source: &Multimap<M>) -> Option<Vec<String>> {
        Some(self.view(source))
    }
}

impl<M: KeyMatch> Fold for EntryAt<M> {
    fn to_vec(&self, source: &Multimap<M>) -> Vec<Vec<String>> {
        vec![self.view(source)]
    }
}

impl<M: KeyMatch> Setter for EntryAt<M> {
    fn over<F>(&self, source: Multimap<M>, mut function: F) -> Multimap<M>
    where
        F: FnMut(Vec<String>) -> Vec<String>,
    {
        let updated = function(self.view(&source));
        source.with(self.name.clone(), updated)
    }
}

static_assertions::assert_impl_all!(Params: Send, Sync);
static_assertions::assert_impl_all!(Headers: Send, Sync);
