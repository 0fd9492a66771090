//! Property-based tests for the options lenses.
//!
//! `param` and `header` satisfy GetPut and PutGet for every starting options
//! value. PutPut holds for the values of a key; key order may differ when
//! the intermediate value moved the key to the end.

use lensed::optics::{Getter, Setter};
use lensed::options::{Options, Redirects, header, param, redirects};
use lensed::query;
use proptest::prelude::*;

fn arb_values() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9 é&=]{0,6}", 0..4)
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "Accept", "accept"]).prop_map(ToString::to_string)
}

fn arb_options() -> impl Strategy<Value = Options> {
    prop::collection::vec((arb_name(), arb_values(), arb_name(), arb_values()), 0..4).prop_map(
        |entries| {
            entries.into_iter().fold(
                Options::default(),
                |opts, (param_name, param_values, header_name, header_values)| {
                    let opts = param(param_name).set(opts, param_values);
                    header(header_name).set(opts, header_values)
                },
            )
        },
    )
}

fn arb_redirects() -> impl Strategy<Value = Redirects> {
    prop_oneof![
        Just(Redirects::NoFollow),
        (0..20u32).prop_map(|max_hops| Redirects::Follow { max_hops }),
    ]
}

proptest! {
    #[test]
    fn prop_param_put_get_law(opts in arb_options(), name in arb_name(), values in arb_values()) {
        let lens = param(name);
        let updated = lens.set(opts, values.clone());
        prop_assert_eq!(lens.view(&updated), values);
    }

    #[test]
    fn prop_param_get_put_law(opts in arb_options(), name in arb_name()) {
        let lens = param(name);
        let current = lens.view(&opts);
        prop_assert_eq!(lens.set(opts.clone(), current), opts);
    }

    #[test]
    fn prop_header_put_get_law(opts in arb_options(), name in arb_name(), values in arb_values()) {
        let lens = header(name.clone());
        let updated = lens.set(opts, values.clone());
        prop_assert_eq!(header(name.to_uppercase()).view(&updated), values);
    }

    #[test]
    fn prop_header_get_put_law(opts in arb_options(), name in arb_name()) {
        let lens = header(name);
        let current = lens.view(&opts);
        prop_assert_eq!(lens.set(opts.clone(), current), opts);
    }

    #[test]
    fn prop_param_put_put_on_values(
        opts in arb_options(),
        name in arb_name(),
        first in arb_values(),
        second in arb_values()
    ) {
        let lens = param(name);
        let twice = lens.set(lens.set(opts.clone(), first), second.clone());
        let once = lens.set(opts, second);
        prop_assert_eq!(lens.view(&twice), lens.view(&once));
    }

    #[test]
    fn prop_param_set_leaves_other_keys(opts in arb_options(), values in arb_values()) {
        let updated = param("a").set(opts.clone(), values);
        prop_assert_eq!(param("b").view(&updated), param("b").view(&opts));
        prop_assert_eq!(param("c").view(&updated), param("c").view(&opts));
    }

    #[test]
    fn prop_redirects_laws(opts in arb_options(), policy in arb_redirects()) {
        let updated = redirects().set(opts.clone(), policy);
        prop_assert_eq!(redirects().view(&updated), policy);
        prop_assert_eq!(redirects().set(opts.clone(), redirects().view(&opts)), opts);
    }

    #[test]
    fn prop_query_has_one_pair_per_value(opts in arb_options()) {
        let rendered = query::render(opts.params());
        let expected: usize = opts.params().iter().map(|(_, values)| values.len()).sum();
        let pairs = if rendered.is_empty() { 0 } else { rendered.split('&').count() };
        prop_assert_eq!(pairs, expected);
        prop_assert!(!rendered.contains(' '));
    }
}
