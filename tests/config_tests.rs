//! Tests for loading `TransportConfig` from environment-style lookups.

use std::collections::HashMap;
use std::time::Duration;

use lensed::config::{
    ConfigError, MAX_REDIRECTS_VAR, TIMEOUT_SECS_VAR, TransportConfig, USER_AGENT_VAR,
};
use rstest::rstest;

fn load(vars: &[(&str, &str)]) -> Result<TransportConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    TransportConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = load(&[]).unwrap();
    assert!(config.user_agent.starts_with("lensed/"));
    assert_eq!(config.timeout, None);
    assert_eq!(config.max_redirects, 10);
    assert_eq!(config.body_limit, 10 * 1024 * 1024);
}

#[test]
fn test_every_variable_is_read() {
    let config = load(&[
        (USER_AGENT_VAR, "crawler/1.0"),
        (TIMEOUT_SECS_VAR, " 15 "),
        (MAX_REDIRECTS_VAR, "2"),
    ])
    .unwrap();
    assert_eq!(config.user_agent, "crawler/1.0");
    assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    assert_eq!(config.max_redirects, 2);
}

#[test]
fn test_blank_user_agent_falls_back() {
    let config = load(&[(USER_AGENT_VAR, "   ")]).unwrap();
    assert_eq!(config.user_agent, TransportConfig::default().user_agent);
}

#[rstest]
#[case(TIMEOUT_SECS_VAR, "soon")]
#[case(TIMEOUT_SECS_VAR, "-1")]
#[case(MAX_REDIRECTS_VAR, "4294967296")]
#[case(MAX_REDIRECTS_VAR, "")]
fn test_unparseable_values_are_errors(#[case] variable: &str, #[case] value: &str) {
    let error = load(&[(variable, value)]).unwrap_err();
    let ConfigError::InvalidValue { key, .. } = &error;
    assert_eq!(key, variable);
    assert!(error.to_string().contains(variable));
}
