//! Property-based tests for the JSON traversals.
//!
//! - identity: `over(s, id) == s`
//! - composition: `over(over(s, f), g) == over(s, g . f)`
//! - `to_vec` after `over` sees every focus rewritten
//! - `length` agrees with `to_vec`

use lensed::json::{as_f64, key, members, nth, values};
use lensed::optics::{Fold, OpticExt, Setter};
use proptest::prelude::*;
use serde_json::{Value, json};

fn arb_numbers() -> impl Strategy<Value = Value> {
    prop::collection::vec(-1000i64..1000, 0..8).prop_map(|items| json!(items))
}

fn arb_record() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-e]", -1000i64..1000, 0..5).prop_map(|map| json!(map))
}

fn bump(value: Value) -> Value {
    as_f64().over(value, |number| number + 1.0)
}

fn double(value: Value) -> Value {
    as_f64().over(value, |number| number * 2.0)
}

proptest! {
    #[test]
    fn prop_values_identity(array in arb_numbers()) {
        prop_assert_eq!(values().over(array.clone(), |value| value), array);
    }

    #[test]
    fn prop_members_identity(record in arb_record()) {
        prop_assert_eq!(members().over(record.clone(), |value| value), record);
    }

    #[test]
    fn prop_values_composition(array in arb_numbers()) {
        let stepwise = values().over(values().over(array.clone(), bump), double);
        let fused = values().over(array, |value| double(bump(value)));
        prop_assert_eq!(stepwise, fused);
    }

    #[test]
    fn prop_values_to_vec_after_over(array in arb_numbers()) {
        let before = values().to_vec(&array);
        let after = values().to_vec(&values().over(array, bump));
        prop_assert_eq!(after, before.into_iter().map(bump).collect::<Vec<_>>());
    }

    #[test]
    fn prop_length_matches_to_vec(array in arb_numbers(), record in arb_record()) {
        prop_assert_eq!(values().length(&array), values().to_vec(&array).len());
        prop_assert_eq!(members().length(&record), members().to_vec(&record).len());
        prop_assert_eq!(values().length(&record), 0);
        prop_assert_eq!(members().length(&array), 0);
    }

    #[test]
    fn prop_nth_in_range_rewrites_one_element(array in arb_numbers(), index in 0usize..10) {
        let updated = nth(index).over(array.clone(), bump);
        let changed = values()
            .to_vec(&array)
            .iter()
            .zip(values().to_vec(&updated))
            .filter(|(old, new)| *old != new)
            .count();
        let in_range = index < values().length(&array);
        prop_assert_eq!(changed, usize::from(in_range));
    }

    #[test]
    fn prop_nested_traversal_reaches_every_leaf(record in arb_record()) {
        let wrapped = json!({ "rows": [record.clone(), record] });
        let leaves = key("rows").compose(values()).compose(members());
        let expected = 2 * members().length(&wrapped["rows"][0]);
        prop_assert_eq!(leaves.to_vec(&wrapped).len(), expected);
    }
}
