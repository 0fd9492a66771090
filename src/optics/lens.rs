//! Lens optics for focusing on struct fields.
//!
//! A lens is a [`Getter`] and a [`Setter`] over the same field. Lenses
//! compose with every other optic; a chain of lenses is again a lens.
//!
//! # Laws
//!
//! 1. **GetPut Law**: `lens.set(source, lens.view(&source)) == source`
//! 2. **PutGet Law**: `lens.view(&lens.set(source, value)) == value`
//! 3. **PutPut Law**: `lens.set(lens.set(source, v1), v2) == lens.set(source, v2)`
//!
//! # Examples
//!
//! ```
//! use lensed::optics::{Getter, Setter};
//! use lensed::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x_lens = lens!(Point, x);
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(x_lens.view(&point), 10);
//!
//! let updated = x_lens.set(point, 100);
//! assert_eq!(updated.x, 100);
//! ```

use std::marker::PhantomData;

use super::{AffineFold, Fold, Getter, Optic, Setter, Strict};

/// A lens implemented using getter and setter functions.
///
/// # Type Parameters
///
/// - `S`: The source type
/// - `A`: The target type
/// - `G`: The getter function type
/// - `St`: The setter function type
///
/// # Example
///
/// ```
/// use lensed::optics::{Getter, FunctionLens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = FunctionLens::new(
///     |point: &Point| &point.x,
///     |point: Point, x: i32| Point { x, ..point },
/// );
///
/// let point = Point { x: 10, y: 20 };
/// assert_eq!(x_lens.view(&point), 10);
/// ```
pub struct FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, A) -> S,
{
    getter: G,
    setter: St,
    _marker: PhantomData<(S, A)>,
}

/// A lens built from plain function pointers.
///
/// This is the lens type produced by the [`lens!`](crate::lens) macro and by
/// `#[derive(Lenses)]`. It is `Copy` and nameable, so it can be stored in
/// structs and returned from functions.
pub type FieldLens<S, A> = FunctionLens<S, A, fn(&S) -> &A, fn(S, A) -> S>;

impl<S, A, G, St> FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, A) -> S,
{
    /// Creates a new `FunctionLens` from a getter and setter.
    ///
    /// # Arguments
    ///
    /// * `getter` - A function that extracts the focused field from the source
    /// * `setter` - A function that creates a new source with the field updated
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A> FunctionLens<S, A, fn(&S) -> &A, fn(S, A) -> S> {
    /// Creates a [`FieldLens`] from non-capturing getter and setter closures.
    #[must_use]
    pub const fn field(getter: fn(&S) -> &A, setter: fn(S, A) -> S) -> Self {
        Self::new(getter, setter)
    }
}

impl<S, A, G, St> Optic for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, A) -> S,
{
    type Source = S;
    type Focus = A;
}

impl<S, A, G, St> Strict for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, A) -> S,
{
}

impl<S, A, G, St> Getter for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, A) -> S,
    A: Clone,
{
    fn view(&self, source: &S) -> A {
        (self.getter)(source).clone()
    }
}

impl<S, A, G, St> AffineFold for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, A) -> S,
    A: Clone,
{
    fn preview(&self, source: &S) -> Option<A> {
        Some(self.view(source))
    }
}

impl<S, A, G, St> Fold for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, A) -> S,
    A: Clone,
{
    fn to_vec(&self, source: &S) -> Vec<A> {
        vec![self.view(source)]
    }

    fn length(&self, _source: &S) -> usize {
        1
    }
}

impl<S, A, G, St> Setter for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, A) -> S,
    A: Clone,
{
    fn over<F>(&self, source: S, mut function: F) -> S
    where
        F: FnMut(A) -> A,
    {
        let current = self.view(&source);
        (self.setter)(source, function(current))
    }

    fn set(&self, source: S, value: A) -> S {
        (self.setter)(source, value)
    }
}

impl<S, A, G, St> Clone for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A + Clone,
    St: Fn(S, A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> Copy for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A + Copy,
    St: Fn(S, A) -> S + Copy,
{
}

impl<S, A, G, St> std::fmt::Debug for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, A) -> S,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .finish_non_exhaustive()
    }
}

/// Creates a [`FieldLens`] for a struct field.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// ```
///
/// # Example
///
/// ```
/// use lensed::optics::{Getter, Setter};
/// use lensed::lens;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = lens!(Point, x);
/// let point = Point { x: 10, y: 20 };
///
/// assert_eq!(x_lens.view(&point), 10);
/// assert_eq!(x_lens.set(point, 100), Point { x: 100, y: 20 });
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ty, $field:ident) => {
        $crate::optics::FieldLens::<$struct_type, _>::field(
            |source: &$struct_type| &source.$field,
            |mut source: $struct_type, value| {
                source.$field = value;
                source
            },
        )
    };
}
