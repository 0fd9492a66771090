//! Prisms matching one variant of a JSON value.
//!
//! Each prism previews its variant's payload, rewrites it in place when the
//! variant matches, and builds a fresh value through [`Review`]. A mismatch is
//! a miss, never a coercion: `as_string` does not read numbers and `as_f64`
//! does not read strings.

use serde_json::{Map, Number, Value};

use crate::optics::{AffineFold, Fold, Optic, OrDefault, Review, Setter, Strict};

macro_rules! variant_prism {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $focus:ty) => {
        paste::paste! {
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            #[doc = concat!("Returns the [`", stringify!($name), "`] prism.")]
            #[must_use]
            pub const fn [<as_ $variant:snake>]() -> $name {
                $name
            }

            impl Optic for $name {
                type Source = Value;
                type Focus = $focus;
            }

            impl Strict for $name {}

            impl AffineFold for $name {
                #[allow(clippy::clone_on_copy)]
                fn preview(&self, source: &Value) -> Option<$focus> {
                    match source {
                        Value::$variant(payload) => Some(payload.clone()),
                        _ => None,
                    }
                }
            }

            impl Fold for $name {
                fn to_vec(&self, source: &Value) -> Vec<$focus> {
                    self.preview(source).into_iter().collect()
                }
            }

            impl Setter for $name {
                fn over<F>(&self, source: Value, mut function: F) -> Value
                where
                    F: FnMut($focus) -> $focus,
                {
                    match source {
                        Value::$variant(payload) => Value::$variant(function(payload)),
                        other => other,
                    }
                }
            }

            impl Review for $name {
                fn review(&self, focus: $focus) -> Value {
                    Value::$variant(focus)
                }
            }
        }
    };
}

variant_prism!(
    /// Matches a JSON string.
    AsString, String, String
);
variant_prism!(
    /// Matches a JSON boolean.
    AsBool, Bool, bool
);
variant_prism!(
    /// Matches a JSON number, keeping its exact representation.
    AsNumber, Number, Number
);
variant_prism!(
    /// Matches a JSON array.
    AsArray, Array, Vec<Value>
);
variant_prism!(
    /// Matches a JSON object.
    AsObject, Object, Map<String, Value>
);

/// Matches a JSON number and reads it as `f64`.
///
/// Writes that produce a non-finite float have no JSON representation and
/// store `null`.
///
/// # Example
///
/// ```
/// use lensed::json::as_f64;
/// use lensed::optics::{AffineFold, Review, Setter};
/// use serde_json::json;
///
/// assert_eq!(as_f64().preview(&json!(2)), Some(2.0));
/// assert_eq!(as_f64().preview(&json!("2")), None);
/// assert_eq!(as_f64().over(json!(1.5), |number| number * 2.0), json!(3.0));
/// assert_eq!(as_f64().review(f64::NAN), json!(null));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AsF64;

/// Returns the [`AsF64`] prism.
#[must_use]
pub const fn as_f64() -> AsF64 {
    AsF64
}

fn float_value(number: f64) -> Value {
    Number::from_f64(number).map_or(Value::Null, Value::Number)
}

impl Optic for AsF64 {
    type Source = Value;
    type Focus = f64;
}

impl Strict for AsF64 {}

impl AffineFold for AsF64 {
    fn preview(&self, source: &Value) -> Option<f64> {
        match source {
            Value::Number(number) => number.as_f64(),
            _ => None,
        }
    }
}

impl Fold for AsF64 {
    fn to_vec(&self, source: &Value) -> Vec<f64> {
        self.preview(source).into_iter().collect()
    }
}

impl Setter for AsF64 {
    fn over<F>(&self, source: Value, mut function: F) -> Value
    where
        F: FnMut(f64) -> f64,
    {
        match source {
            Value::Number(number) => match number.as_f64() {
                Some(current) => float_value(function(current)),
                None => Value::Number(number),
            },
            other => other,
        }
    }
}

impl Review for AsF64 {
    fn review(&self, focus: f64) -> Value {
        float_value(focus)
    }
}

/// Matches a JSON number that is an integer representable as `i64`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AsI64;

/// Returns the [`AsI64`] prism.
#[must_use]
pub const fn as_i64() -> AsI64 {
    AsI64
}

impl Optic for AsI64 {
    type Source = Value;
    type Focus = i64;
}

impl Strict for AsI64 {}

impl AffineFold for AsI64 {
    fn preview(&self, source: &Value) -> Option<i64> {
        match source {
            Value::Number(number) => number.as_i64(),
            _ => None,
        }
    }
}

impl Fold for AsI64 {
    fn to_vec(&self, source: &Value) -> Vec<i64> {
        self.preview(source).into_iter().collect()
    }
}

impl Setter for AsI64 {
    fn over<F>(&self, source: Value, mut function: F) -> Value
    where
        F: FnMut(i64) -> i64,
    {
        match source {
            Value::Number(number) => match number.as_i64() {
                Some(current) => Value::Number(function(current).into()),
                None => Value::Number(number),
            },
            other => other,
        }
    }
}

impl Review for AsI64 {
    fn review(&self, focus: i64) -> Value {
        Value::Number(focus.into())
    }
}

/// Reads a string, or `""` when the value is not one.
#[must_use]
pub const fn string_or() -> OrDefault<AsString> {
    OrDefault::new(AsString)
}

/// Reads a number as `f64`, or `0.0` when the value is not one.
#[must_use]
pub const fn number_or() -> OrDefault<AsF64> {
    OrDefault::new(AsF64)
}

/// Reads a boolean, or `false` when the value is not one.
#[must_use]
pub const fn bool_or() -> OrDefault<AsBool> {
    OrDefault::new(AsBool)
}

/// Reads an array, or `[]` when the value is not one.
#[must_use]
pub const fn array_or() -> OrDefault<AsArray> {
    OrDefault::new(AsArray)
}

/// Reads an object, or `{}` when the value is not one.
#[must_use]
pub const fn object_or() -> OrDefault<AsObject> {
    OrDefault::new(AsObject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::Getter;
    use serde_json::json;

    #[test]
    fn test_prisms_do_not_coerce() {
        assert_eq!(as_string().preview(&json!(1)), None);
        assert_eq!(as_bool().preview(&json!("true")), None);
        assert_eq!(as_f64().preview(&json!("1.0")), None);
        assert_eq!(as_i64().preview(&json!(1.5)), None);
    }

    #[test]
    fn test_review_builds_variant() {
        assert_eq!(as_string().review("x".to_string()), json!("x"));
        assert_eq!(as_bool().review(true), json!(true));
        assert_eq!(as_array().review(vec![json!(1)]), json!([1]));
        assert_eq!(as_i64().review(-3), json!(-3));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(string_or().view(&json!(null)), "");
        assert!(!bool_or().view(&json!(1)));
        assert!(array_or().view(&json!({})).is_empty());
        assert!(object_or().view(&json!([])).is_empty());
        assert!(number_or().view(&json!("7")).abs() < f64::EPSILON);
    }

    #[test]
    fn test_setter_on_mismatch_is_unchanged() {
        let value = json!({ "a": 1 });
        assert_eq!(as_string().set(value.clone(), "x".to_string()), value);
        assert_eq!(as_i64().over(json!(2.5), |number| number + 1), json!(2.5));
    }
}
