//! Silent defaults for partial optics.
//!
//! [`OrDefault`] turns a chain that may miss into a total [`Getter`]: `view`
//! returns the focus when it is present and `Focus::default()` otherwise.
//! `preview` is left untouched, so the same chain still reports absence to a
//! caller who asks for it.
//!
//! Composing anything before an `OrDefault` wraps the whole chain, which is
//! what makes `key("url").compose(string_or())` a getter even though `key`
//! alone is not.
//!
//! # Example
//!
//! ```
//! use lensed::optics::{AffineFold, Getter, OpticExt};
//! use lensed::json::{key, string_or};
//! use serde_json::json;
//!
//! let url = key("url").compose(string_or());
//! let missing = json!({ "fnord": true });
//!
//! assert_eq!(url.view(&missing), "");
//! assert_eq!(url.preview(&missing), None);
//! ```

use super::{AffineFold, ComposeAfter, Composed, Fold, Getter, Optic, Setter};

/// A partial optic whose `view` falls back to `Focus::default()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrDefault<O> {
    inner: O,
}

impl<O> OrDefault<O> {
    /// Wraps a partial optic.
    #[must_use]
    pub const fn new(inner: O) -> Self {
        Self { inner }
    }

    /// Returns the wrapped optic.
    pub const fn inner(&self) -> &O {
        &self.inner
    }

    /// Unwraps the optic, dropping the default.
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: Optic> Optic for OrDefault<O> {
    type Source = O::Source;
    type Focus = O::Focus;
}

impl<O> Getter for OrDefault<O>
where
    O: AffineFold,
    O::Focus: Default,
{
    fn view(&self, source: &Self::Source) -> Self::Focus {
        self.inner.preview(source).unwrap_or_default()
    }
}

impl<O: AffineFold> AffineFold for OrDefault<O> {
    fn preview(&self, source: &Self::Source) -> Option<Self::Focus> {
        self.inner.preview(source)
    }
}

impl<O: Fold> Fold for OrDefault<O> {
    fn to_vec(&self, source: &Self::Source) -> Vec<Self::Focus> {
        self.inner.to_vec(source)
    }
}

impl<O: Setter> Setter for OrDefault<O> {
    fn over<F>(&self, source: Self::Source, function: F) -> Self::Source
    where
        F: FnMut(Self::Focus) -> Self::Focus,
    {
        self.inner.over(source, function)
    }
}

impl<Outer, O> ComposeAfter<Outer> for OrDefault<O>
where
    Outer: Optic,
    O: Optic<Source = Outer::Focus>,
{
    type Output = OrDefault<Composed<Outer, O>>;

    fn compose_after(self, outer: Outer) -> Self::Output {
        OrDefault::new(Composed::new(outer, self.inner))
    }
}
