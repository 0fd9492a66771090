//! Structural steps into JSON objects and arrays.

use std::mem;

use serde_json::Value;

use crate::optics::{AffineFold, Fold, Optic, Setter, Strict};

/// Focuses the entry of an object under a fixed key.
///
/// Absent when the value is not an object or the key is missing. Setting
/// through a missing key returns the value unchanged.
///
/// # Example
///
/// ```
/// use lensed::json::key;
/// use lensed::optics::{AffineFold, Setter};
/// use serde_json::json;
///
/// let url = key("url");
/// assert_eq!(url.preview(&json!({ "url": "http://x" })), Some(json!("http://x")));
/// assert_eq!(url.preview(&json!([1, 2])), None);
///
/// let untouched = url.set(json!({ "other": 1 }), json!("ignored"));
/// assert_eq!(untouched, json!({ "other": 1 }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    name: String,
}

impl Key {
    /// Creates an optic for the entry under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the key this optic looks up.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Returns an optic focusing the object entry under `name`.
pub fn key(name: impl Into<String>) -> Key {
    Key::new(name)
}

impl Optic for Key {
    type Source = Value;
    type Focus = Value;
}

impl Strict for Key {}

impl AffineFold for Key {
    fn preview(&self, source: &Value) -> Option<Value> {
        match source {
            Value::Object(map) => map.get(&self.name).cloned(),
            _ => None,
        }
    }
}

impl Fold for Key {
    fn to_vec(&self, source: &Value) -> Vec<Value> {
        self.preview(source).into_iter().collect()
    }
}

impl Setter for Key {
    fn over<F>(&self, source: Value, mut function: F) -> Value
    where
        F: FnMut(Value) -> Value,
    {
        match source {
            Value::Object(mut map) => {
                if let Some(slot) = map.get_mut(&self.name) {
                    *slot = function(mem::take(slot));
                }
                Value::Object(map)
            }
            other => other,
        }
    }
}

/// Focuses the array element at a fixed index.
///
/// Absent when the value is not an array or the index is out of bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Nth {
    index: usize,
}

impl Nth {
    /// Creates an optic for the element at `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the index this optic looks up.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// Returns an optic focusing the array element at `index`.
#[must_use]
pub const fn nth(index: usize) -> Nth {
    Nth::new(index)
}

impl Optic for Nth {
    type Source = Value;
    type Focus = Value;
}

impl Strict for Nth {}

impl AffineFold for Nth {
    fn preview(&self, source: &Value) -> Option<Value> {
        match source {
            Value::Array(items) => items.get(self.index).cloned(),
            _ => None,
        }
    }
}

impl Fold for Nth {
    fn to_vec(&self, source: &Value) -> Vec<Value> {
        self.preview(source).into_iter().collect()
    }
}

impl Setter for Nth {
    fn over<F>(&self, source: Value, mut function: F) -> Value
    where
        F: FnMut(Value) -> Value,
    {
        match source {
            Value::Array(mut items) => {
                if let Some(slot) = items.get_mut(self.index) {
                    *slot = function(mem::take(slot));
                }
                Value::Array(items)
            }
            other => other,
        }
    }
}

/// Traverses every element of an array, in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Values;

/// Returns a traversal over every array element.
#[must_use]
pub const fn values() -> Values {
    Values
}

impl Optic for Values {
    type Source = Value;
    type Focus = Value;
}

impl Strict for Values {}

impl Fold for Values {
    fn to_vec(&self, source: &Value) -> Vec<Value> {
        match source {
            Value::Array(items) => items.clone(),
            _ => Vec::new(),
        }
    }

    fn length(&self, source: &Value) -> usize {
        match source {
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }
}

impl Setter for Values {
    fn over<F>(&self, source: Value, function: F) -> Value
    where
        F: FnMut(Value) -> Value,
    {
        match source {
            Value::Array(items) => Value::Array(items.into_iter().map(function).collect()),
            other => other,
        }
    }
}

/// Traverses every value of an object, in key order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Members;

/// Returns a traversal over every object value.
#[must_use]
pub const fn members() -> Members {
    Members
}

impl Optic for Members {
    type Source = Value;
    type Focus = Value;
}

impl Strict for Members {}

impl Fold for Members {
    fn to_vec(&self, source: &Value) -> Vec<Value> {
        match source {
            Value::Object(map) => map.values().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn length(&self, source: &Value) -> usize {
        match source {
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }
}

impl Setter for Members {
    fn over<F>(&self, source: Value, mut function: F) -> Value
    where
        F: FnMut(Value) -> Value,
    {
        match source {
            Value::Object(mut map) => {
                for slot in map.values_mut() {
                    *slot = function(mem::take(slot));
                }
                Value::Object(map)
            }
            other => other,
        }
    }
}
