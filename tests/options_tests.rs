//! Unit tests for the request options model.
//!
//! - [`param`] / [`header`]: multimap lenses with replace semantics
//! - field lenses: `auth`, `redirects`, `timeout`, `session`
//! - query serialization of the resulting parameters

use std::time::Duration;

use lensed::multimap::Params;
use lensed::optics::{Getter, OpticExt, Setter};
use lensed::options::{
    Auth, Options, Redirects, Session, auth, header, headers, param, params, redirects, session,
    timeout,
};
use lensed::query;
use lensed::transport::{RawResponse, Request, TransportError};
use rstest::rstest;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn ok(_: &Request) -> Result<RawResponse, TransportError> {
    Ok(RawResponse::new(204, "No Content"))
}

// =============================================================================
// param / header
// =============================================================================

#[test]
fn test_param_missing_reads_empty() {
    assert!(param("foo").view(&Options::default()).is_empty());
}

#[test]
fn test_param_set_replaces_rather_than_appends() {
    let opts = param("foo").set(Options::default(), strings(&["bar"]));
    let opts = param("foo").set(opts, strings(&["quux"]));
    assert_eq!(param("foo").view(&opts), ["quux"]);
}

#[test]
fn test_param_over_appends_through_the_list() {
    let opts = param("foo").set(Options::default(), strings(&["bar"]));
    let opts = param("foo").over(opts, |mut values| {
        values.push("quux".to_string());
        values
    });
    assert_eq!(param("foo").view(&opts), ["bar", "quux"]);
}

#[test]
fn test_param_keys_are_case_sensitive() {
    let opts = param("Foo").set(Options::default(), strings(&["1"]));
    assert!(param("foo").view(&opts).is_empty());
}

#[rstest]
#[case("accept")]
#[case("ACCEPT")]
#[case("Accept")]
fn test_header_names_are_case_insensitive(#[case] lookup: &str) {
    let opts = header("Accept").set(Options::default(), strings(&["application/json"]));
    assert_eq!(header(lookup).view(&opts), ["application/json"]);
}

#[test]
fn test_setting_empty_list_removes_the_key() {
    let opts = param("foo").set(Options::default(), strings(&["bar"]));
    let opts = param("foo").set(opts, Vec::new());
    assert!(params().view(&opts).is_empty());
    assert_eq!(opts, Options::default());
}

#[test]
fn test_original_options_are_untouched() {
    let original = Options::default();
    let updated = header("X-Trace").set(original.clone(), strings(&["1"]));
    assert!(headers().view(&original).is_empty());
    assert_eq!(headers().view(&updated).len(), 1);
}

// =============================================================================
// Field lenses
// =============================================================================

#[test]
fn test_auth_lens() {
    let opts = auth().set(Options::default(), Some(Auth::basic("user", "pass")));
    assert_eq!(
        auth().view(&opts),
        Some(Auth::Basic {
            user: "user".to_string(),
            password: "pass".to_string()
        })
    );
    assert_eq!(auth().set(opts, None), Options::default());
}

#[rstest]
#[case(Redirects::NoFollow, 0)]
#[case(Redirects::Follow { max_hops: 3 }, 3)]
#[case(Redirects::default(), 10)]
fn test_redirects_lens(#[case] policy: Redirects, #[case] hops: u32) {
    let opts = redirects().set(Options::default(), policy);
    assert_eq!(redirects().view(&opts), policy);
    assert_eq!(opts.redirects().max_hops(), hops);
}

#[test]
fn test_timeout_lens() {
    let opts = timeout().set(Options::default(), Some(Duration::from_secs(5)));
    assert_eq!(opts.timeout(), Some(Duration::from_secs(5)));
}

#[test]
fn test_session_lens_shares_the_handle() {
    let shared = Session::new(ok);
    let first = session().set(Options::default(), Some(shared.clone()));
    let second = session().set(Options::default(), Some(shared));
    assert_eq!(session().view(&first), session().view(&second));
    assert_ne!(first, session().set(Options::default(), Some(Session::new(ok))));
}

#[test]
fn test_params_lens_composes_with_entry_lens() {
    let whole = params().set(Options::default(), Params::new().append("a", "1"));
    let through_whole = params().compose(lensed::multimap::at::<lensed::multimap::Exact>("a"));
    assert_eq!(through_whole.view(&whole), ["1"]);
}

// =============================================================================
// Query serialization
// =============================================================================

#[test]
fn test_repeated_values_serialize_as_repeated_pairs() {
    let opts = param("foo").set(Options::default(), strings(&["bar", "quux"]));
    assert_eq!(query::render(opts.params()), "foo=bar&foo=quux");
}

#[test]
fn test_space_and_non_ascii_are_percent_encoded() {
    let opts = param("q").set(Options::default(), strings(&["café au lait"]));
    assert_eq!(query::render(opts.params()), "q=caf%C3%A9%20au%20lait");
}

#[test]
fn test_serialization_follows_last_set_order() {
    let opts = param("a").set(Options::default(), strings(&["1"]));
    let opts = param("b").set(opts, strings(&["2"]));
    let opts = param("a").set(opts, strings(&["3"]));
    assert_eq!(query::render(opts.params()), "b=2&a=3");
}

#[test]
fn test_setting_same_list_keeps_position() {
    let opts = param("a").set(Options::default(), strings(&["1"]));
    let opts = param("b").set(opts, strings(&["2"]));
    let opts = param("a").set(opts, strings(&["1"]));
    assert_eq!(query::render(opts.params()), "a=1&b=2");
}
