//! Optics for immutable data manipulation.
//!
//! An optic is a composable accessor over a source type and a focus type.
//! Every optic implements [`Optic`], which fixes those two types, and then
//! one or more capability traits:
//!
//! - [`Getter`]: total extraction of exactly one focus
//! - [`AffineFold`]: extraction of zero or one focus ("preview")
//! - [`Fold`]: extraction of zero or more foci, in order
//! - [`Setter`]: copy-on-write update of every focus
//!
//! # Capability Lattice
//!
//! ```text
//! Getter <: AffineFold <: Fold
//! Lens = Getter + Setter
//! Prism = AffineFold + Setter + Review
//! Traversal = Fold + Setter
//! ```
//!
//! Composition goes through [`OpticExt::compose`]. The result is a
//! [`Composed`] value that implements a capability exactly when both halves
//! do, so the capability of a chain is the intersection of its stages,
//! decided at compile time. A chain short-circuits: once a stage finds no
//! focus, later stages are never evaluated.
//!
//! # Example
//!
//! ```
//! use lensed::lens;
//! use lensed::optics::{Getter, OpticExt, Setter};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Address { street: String, city: String }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Person { name: String, address: Address }
//!
//! let person_street = lens!(Person, address).compose(lens!(Address, street));
//!
//! let person = Person {
//!     name: "Alice".to_string(),
//!     address: Address { street: "Main St".to_string(), city: "Tokyo".to_string() },
//! };
//!
//! assert_eq!(person_street.view(&person), "Main St");
//!
//! let updated = person_street.set(person, "Oak Ave".to_string());
//! assert_eq!(updated.address.street, "Oak Ave");
//! assert_eq!(updated.address.city, "Tokyo");
//! ```
//!
//! # Laws
//!
//! Every Getter + Setter chain `l` satisfies:
//!
//! 1. **PutGet Law**: Setting then viewing yields the set value.
//!    ```text
//!    view(l, set(l, a, s)) == a
//!    ```
//!
//! 2. **GetPut Law**: Viewing and setting back yields the original.
//!    ```text
//!    set(l, view(l, s), s) == s
//!    ```

mod compose;
mod function;
mod lens;
mod or_default;

pub use compose::ComposeAfter;
pub use compose::Composed;
pub use compose::Identity;
pub use compose::OpticExt;
pub use compose::compose;
pub use compose::identity;

pub use function::FunctionAffineFold;
pub use function::FunctionFold;
pub use function::FunctionGetter;

pub use lens::FieldLens;
pub use lens::FunctionLens;

pub use or_default::OrDefault;

/// Fixes the source and focus types of an optic.
pub trait Optic {
    /// The whole structure the optic is applied to.
    type Source;
    /// The part of the structure the optic focuses on.
    type Focus;
}

/// An optic that reports a missing focus to its caller.
///
/// Every optic except [`OrDefault`] is strict. Composing a strict optic after
/// another one yields a plain [`Composed`]; composing an [`OrDefault`] moves
/// the default to the outside of the whole chain instead.
pub trait Strict: Optic {}

/// Total extraction of exactly one focus.
pub trait Getter: Optic {
    /// Extracts the focus from the source.
    fn view(&self, source: &Self::Source) -> Self::Focus;
}

/// Extraction of at most one focus.
pub trait AffineFold: Optic {
    /// Returns the focus if it is present.
    fn preview(&self, source: &Self::Source) -> Option<Self::Focus>;

    /// Returns `true` if the focus is present.
    fn is_present(&self, source: &Self::Source) -> bool {
        self.preview(source).is_some()
    }
}

/// Extraction of zero or more foci, in order.
pub trait Fold: Optic {
    /// Returns every focus, in order. Never fails; an empty vector means
    /// "no focus".
    fn to_vec(&self, source: &Self::Source) -> Vec<Self::Focus>;

    /// Returns the number of foci.
    fn length(&self, source: &Self::Source) -> usize {
        self.to_vec(source).len()
    }

    /// Tests if any focus satisfies a predicate.
    fn exists<P>(&self, source: &Self::Source, predicate: P) -> bool
    where
        P: FnMut(&Self::Focus) -> bool,
    {
        self.to_vec(source).iter().any(predicate)
    }

    /// Tests if every focus satisfies a predicate. Vacuously true when there
    /// is no focus.
    fn for_all<P>(&self, source: &Self::Source, predicate: P) -> bool
    where
        P: FnMut(&Self::Focus) -> bool,
    {
        self.to_vec(source).iter().all(predicate)
    }

    /// Returns the first focus, if any.
    fn head_option(&self, source: &Self::Source) -> Option<Self::Focus> {
        self.to_vec(source).into_iter().next()
    }
}

/// Copy-on-write update of every focus.
///
/// Updating through a path with no focus returns the source unchanged.
pub trait Setter: Optic {
    /// Applies `function` to every focus and returns the rebuilt source.
    fn over<F>(&self, source: Self::Source, function: F) -> Self::Source
    where
        F: FnMut(Self::Focus) -> Self::Focus;

    /// Replaces every focus with `value`.
    fn set(&self, source: Self::Source, value: Self::Focus) -> Self::Source
    where
        Self::Focus: Clone,
    {
        self.over(source, |_| value.clone())
    }
}

/// Builds a source back from a focus; the constructor half of a prism.
pub trait Review: Optic {
    /// Wraps the focus into a source.
    fn review(&self, focus: Self::Focus) -> Self::Source;
}

/// Extracts the focus of a [`Getter`].
pub fn view<O: Getter>(optic: &O, source: &O::Source) -> O::Focus {
    optic.view(source)
}

/// Extracts the focus of an [`AffineFold`], if present.
pub fn preview<O: AffineFold>(optic: &O, source: &O::Source) -> Option<O::Focus> {
    optic.preview(source)
}

/// Extracts every focus of a [`Fold`], in order.
pub fn to_vec<O: Fold>(optic: &O, source: &O::Source) -> Vec<O::Focus> {
    optic.to_vec(source)
}

/// Replaces every focus of a [`Setter`] with `value`.
pub fn set<O>(optic: &O, value: O::Focus, source: O::Source) -> O::Source
where
    O: Setter,
    O::Focus: Clone,
{
    optic.set(source, value)
}

/// Applies `function` to every focus of a [`Setter`].
pub fn over<O, F>(optic: &O, function: F, source: O::Source) -> O::Source
where
    O: Setter,
    F: FnMut(O::Focus) -> O::Focus,
{
    optic.over(source, function)
}
