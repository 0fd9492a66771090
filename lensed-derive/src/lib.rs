//! Derive macro for lensed field lenses.
//!
//! # Example
//!
//! ```rust,ignore
//! use lensed::Lenses;
//! use lensed::optics::{Getter, Setter};
//!
//! #[derive(Clone, Lenses)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! // Generated methods:
//! // - Point::x_lens() -> lensed::optics::FieldLens<Point, i32>
//! // - Point::y_lens() -> lensed::optics::FieldLens<Point, i32>
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(Point::x_lens().view(&point), 10);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod lenses;

use proc_macro::TokenStream;

/// Derive macro generating one field lens per named struct field.
///
/// For each field `foo` of type `T`, generates:
///
/// ```rust,ignore
/// impl StructName {
///     pub fn foo_lens() -> ::lensed::optics::FieldLens<Self, T> { ... }
/// }
/// ```
///
/// The returned lens is `Copy`, and composes with every other lensed optic.
/// Fields marked `#[lens(skip)]` get no lens.
///
/// # Errors
///
/// Produces a compile error on enums, unions, tuple structs and unit structs,
/// and on any `#[lens(...)]` key other than `skip`.
#[proc_macro_derive(Lenses, attributes(lens))]
pub fn derive_lenses(input: TokenStream) -> TokenStream {
    lenses::derive_lenses_impl(input)
}
