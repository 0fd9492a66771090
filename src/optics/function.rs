//! Read-only optics built from plain functions.
//!
//! These are the quickest way to lift an existing accessor into the optic
//! algebra so it can take part in composition.
//!
//! # Examples
//!
//! ```
//! use lensed::optics::{Fold, FunctionFold};
//!
//! let evens = FunctionFold::new(|numbers: &Vec<i32>| {
//!     numbers.iter().copied().filter(|number| number % 2 == 0).collect()
//! });
//!
//! assert_eq!(evens.to_vec(&vec![1, 2, 3, 4]), vec![2, 4]);
//! assert_eq!(evens.length(&vec![1, 3]), 0);
//! ```

use std::marker::PhantomData;

use super::{AffineFold, Fold, Getter, Optic, Strict};

/// A [`Getter`] backed by a function.
pub struct FunctionGetter<S, A, G>
where
    G: Fn(&S) -> A,
{
    getter: G,
    _marker: PhantomData<fn(&S) -> A>,
}

impl<S, A, G> FunctionGetter<S, A, G>
where
    G: Fn(&S) -> A,
{
    /// Creates a new `FunctionGetter`.
    #[must_use]
    pub const fn new(getter: G) -> Self {
        Self {
            getter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G> Optic for FunctionGetter<S, A, G>
where
    G: Fn(&S) -> A,
{
    type Source = S;
    type Focus = A;
}

impl<S, A, G> Strict for FunctionGetter<S, A, G> where G: Fn(&S) -> A {}

impl<S, A, G> Getter for FunctionGetter<S, A, G>
where
    G: Fn(&S) -> A,
{
    fn view(&self, source: &S) -> A {
        (self.getter)(source)
    }
}

impl<S, A, G> AffineFold for FunctionGetter<S, A, G>
where
    G: Fn(&S) -> A,
{
    fn preview(&self, source: &S) -> Option<A> {
        Some(self.view(source))
    }
}

impl<S, A, G> Fold for FunctionGetter<S, A, G>
where
    G: Fn(&S) -> A,
{
    fn to_vec(&self, source: &S) -> Vec<A> {
        vec![self.view(source)]
    }
}

impl<S, A, G> Clone for FunctionGetter<S, A, G>
where
    G: Fn(&S) -> A + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.getter.clone())
    }
}

impl<S, A, G> std::fmt::Debug for FunctionGetter<S, A, G>
where
    G: Fn(&S) -> A,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionGetter")
            .finish_non_exhaustive()
    }
}

/// An [`AffineFold`] backed by a function returning `Option`.
pub struct FunctionAffineFold<S, A, P>
where
    P: Fn(&S) -> Option<A>,
{
    preview: P,
    _marker: PhantomData<fn(&S) -> A>,
}

impl<S, A, P> FunctionAffineFold<S, A, P>
where
    P: Fn(&S) -> Option<A>,
{
    /// Creates a new `FunctionAffineFold`.
    #[must_use]
    pub const fn new(preview: P) -> Self {
        Self {
            preview,
            _marker: PhantomData,
        }
    }
}

impl<S, A, P> Optic for FunctionAffineFold<S, A, P>
where
    P: Fn(&S) -> Option<A>,
{
    type Source = S;
    type Focus = A;
}

impl<S, A, P> Strict for FunctionAffineFold<S, A, P> where P: Fn(&S) -> Option<A> {}

impl<S, A, P> AffineFold for FunctionAffineFold<S, A, P>
where
    P: Fn(&S) -> Option<A>,
{
    fn preview(&self, source: &S) -> Option<A> {
        (self.preview)(source)
    }
}

impl<S, A, P> Fold for FunctionAffineFold<S, A, P>
where
    P: Fn(&S) -> Option<A>,
{
    fn to_vec(&self, source: &S) -> Vec<A> {
        self.preview(source).into_iter().collect()
    }
}

impl<S, A, P> Clone for FunctionAffineFold<S, A, P>
where
    P: Fn(&S) -> Option<A> + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.preview.clone())
    }
}

impl<S, A, P> std::fmt::Debug for FunctionAffineFold<S, A, P>
where
    P: Fn(&S) -> Option<A>,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionAffineFold")
            .finish_non_exhaustive()
    }
}

/// A [`Fold`] backed by a function returning every focus.
pub struct FunctionFold<S, A, F>
where
    F: Fn(&S) -> Vec<A>,
{
    fold: F,
    _marker: PhantomData<fn(&S) -> A>,
}

impl<S, A, F> FunctionFold<S, A, F>
where
    F: Fn(&S) -> Vec<A>,
{
    /// Creates a new `FunctionFold`.
    #[must_use]
    pub const fn new(fold: F) -> Self {
        Self {
            fold,
            _marker: PhantomData,
        }
    }
}

impl<S, A, F> Optic for FunctionFold<S, A, F>
where
    F: Fn(&S) -> Vec<A>,
{
    type Source = S;
    type Focus = A;
}

impl<S, A, F> Strict for FunctionFold<S, A, F> where F: Fn(&S) -> Vec<A> {}

impl<S, A, F> Fold for FunctionFold<S, A, F>
where
    F: Fn(&S) -> Vec<A>,
{
    fn to_vec(&self, source: &S) -> Vec<A> {
        (self.fold)(source)
    }
}

impl<S, A, F> Clone for FunctionFold<S, A, F>
where
    F: Fn(&S) -> Vec<A> + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.fold.clone())
    }
}

impl<S, A, F> std::fmt::Debug for FunctionFold<S, A, F>
where
    F: Fn(&S) -> Vec<A>,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionFold")
            .finish_non_exhaustive()
    }
}
