//! Composition of optics.
//!
//! [`Composed`] chains two optics whose types line up (the focus of the
//! first is the source of the second). It implements each capability trait
//! exactly when both of its halves do:
//!
//! | first \ second | Getter      | AffineFold  | Fold |
//! |----------------|-------------|-------------|------|
//! | Getter         | Getter      | AffineFold  | Fold |
//! | AffineFold     | AffineFold  | AffineFold  | Fold |
//! | Fold           | Fold        | Fold        | Fold |
//!
//! and it is a [`Setter`] when both halves are setters, which makes a
//! traversal composed with a lens an "update all matches" setter.
//!
//! # Examples
//!
//! ```
//! use lensed::optics::{AffineFold, Getter, OpticExt, identity};
//! use lensed::json::{as_string, key};
//! use serde_json::json;
//!
//! let url = key("args").compose(key("url")).compose(as_string());
//!
//! let document = json!({ "args": { "url": "http://x/get" } });
//! assert_eq!(url.preview(&document), Some("http://x/get".to_string()));
//! assert_eq!(url.preview(&json!({ "args": 1 })), None);
//!
//! // The identity optic is the unit of composition.
//! let same = identity::<i32>().compose(identity());
//! assert_eq!(same.view(&7), 7);
//! ```

use std::marker::PhantomData;

use super::{AffineFold, Fold, Getter, Optic, Review, Setter, Strict};

/// Two optics applied one after the other.
///
/// # Type Parameters
///
/// - `O1`: The outer optic (applied to the whole source)
/// - `O2`: The inner optic (applied to the outer optic's focus)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Composed<O1, O2> {
    first: O1,
    second: O2,
}

impl<O1, O2> Composed<O1, O2> {
    /// Creates a new composed optic.
    ///
    /// # Arguments
    ///
    /// * `first` - The outer optic
    /// * `second` - The inner optic
    #[must_use]
    pub const fn new(first: O1, second: O2) -> Self {
        Self { first, second }
    }

    /// Returns the outer optic.
    pub const fn first(&self) -> &O1 {
        &self.first
    }

    /// Returns the inner optic.
    pub const fn second(&self) -> &O2 {
        &self.second
    }
}

impl<O1, O2> Optic for Composed<O1, O2>
where
    O1: Optic,
    O2: Optic<Source = O1::Focus>,
{
    type Source = O1::Source;
    type Focus = O2::Focus;
}

impl<O1, O2> Strict for Composed<O1, O2>
where
    O1: Optic,
    O2: Optic<Source = O1::Focus>,
{
}

impl<O1, O2> Getter for Composed<O1, O2>
where
    O1: Getter,
    O2: Getter<Source = O1::Focus>,
{
    fn view(&self, source: &Self::Source) -> Self::Focus {
        self.second.view(&self.first.view(source))
    }
}

impl<O1, O2> AffineFold for Composed<O1, O2>
where
    O1: AffineFold,
    O2: AffineFold<Source = O1::Focus>,
{
    fn preview(&self, source: &Self::Source) -> Option<Self::Focus> {
        self.first
            .preview(source)
            .and_then(|intermediate| self.second.preview(&intermediate))
    }
}

impl<O1, O2> Fold for Composed<O1, O2>
where
    O1: Fold,
    O2: Fold<Source = O1::Focus>,
{
    fn to_vec(&self, source: &Self::Source) -> Vec<Self::Focus> {
        self.first
            .to_vec(source)
            .iter()
            .flat_map(|intermediate| self.second.to_vec(intermediate))
            .collect()
    }
}

impl<O1, O2> Setter for Composed<O1, O2>
where
    O1: Setter,
    O2: Setter<Source = O1::Focus>,
{
    fn over<F>(&self, source: Self::Source, mut function: F) -> Self::Source
    where
        F: FnMut(Self::Focus) -> Self::Focus,
    {
        let second = &self.second;
        self.first.over(source, |intermediate| {
            second.over(intermediate, &mut function)
        })
    }
}

impl<O1, O2> Review for Composed<O1, O2>
where
    O1: Review,
    O2: Review<Source = O1::Focus>,
{
    fn review(&self, focus: Self::Focus) -> Self::Source {
        self.first.review(self.second.review(focus))
    }
}

/// Decides what composing `Self` after an `Outer` optic produces.
///
/// Strict optics produce [`Composed`]; [`OrDefault`](super::OrDefault)
/// produces an `OrDefault` around the whole chain.
pub trait ComposeAfter<Outer: Optic>: Optic<Source = Outer::Focus> + Sized {
    /// The optic produced by the composition.
    type Output;

    /// Composes `outer` then `self`.
    fn compose_after(self, outer: Outer) -> Self::Output;
}

impl<Outer, Inner> ComposeAfter<Outer> for Inner
where
    Outer: Optic,
    Inner: Strict<Source = Outer::Focus>,
{
    type Output = Composed<Outer, Inner>;

    fn compose_after(self, outer: Outer) -> Self::Output {
        Composed::new(outer, self)
    }
}

/// Composition methods available on every optic.
pub trait OpticExt: Optic + Sized {
    /// Composes this optic with `inner`, focusing on `inner`'s focus within
    /// this optic's focus.
    ///
    /// # Example
    ///
    /// ```
    /// use lensed::optics::{Getter, OpticExt};
    /// use lensed::json::{key, string_or};
    /// use serde_json::json;
    ///
    /// let url = key("url").compose(string_or());
    /// assert_eq!(url.view(&json!({ "url": "http://x/get" })), "http://x/get");
    /// assert_eq!(url.view(&json!({ "fnord": 1 })), "");
    /// ```
    fn compose<Inner>(self, inner: Inner) -> Inner::Output
    where
        Inner: ComposeAfter<Self>,
    {
        inner.compose_after(self)
    }
}

impl<O: Optic> OpticExt for O {}

/// Composes `outer` then `inner`; the free-function form of
/// [`OpticExt::compose`].
pub fn compose<Outer, Inner>(outer: Outer, inner: Inner) -> Inner::Output
where
    Outer: Optic,
    Inner: ComposeAfter<Outer>,
{
    inner.compose_after(outer)
}

/// The identity optic: focuses on the whole source.
///
/// As a getter it returns the source; as a setter it replaces the whole
/// value. Composing with it changes nothing.
pub struct Identity<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> Identity<T> {
    /// Creates the identity optic.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

/// Returns the identity optic for `T`.
#[must_use]
pub const fn identity<T>() -> Identity<T> {
    Identity::new()
}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Identity<T> {}

impl<T> std::fmt::Debug for Identity<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("Identity")
    }
}

impl<T> Optic for Identity<T> {
    type Source = T;
    type Focus = T;
}

impl<T> Strict for Identity<T> {}

impl<T: Clone> Getter for Identity<T> {
    fn view(&self, source: &T) -> T {
        source.clone()
    }
}

impl<T: Clone> AffineFold for Identity<T> {
    fn preview(&self, source: &T) -> Option<T> {
        Some(source.clone())
    }
}

impl<T: Clone> Fold for Identity<T> {
    fn to_vec(&self, source: &T) -> Vec<T> {
        vec![source.clone()]
    }
}

impl<T> Setter for Identity<T> {
    fn over<F>(&self, source: T, mut function: F) -> T
    where
        F: FnMut(T) -> T,
    {
        function(source)
    }
}

impl<T> Review for Identity<T> {
    fn review(&self, focus: T) -> T {
        focus
    }
}
