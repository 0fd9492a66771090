//! Transport configuration loaded from the environment.
//!
//! Every setting is optional; unset variables fall back to the defaults of
//! [`TransportConfig::default`]. A variable that is set but cannot be parsed
//! is an error from [`TransportConfig::from_env`]. The default transport used
//! by requests without a session loads its settings through
//! [`TransportConfig::from_env_or_default`], which logs the error and keeps
//! the defaults.
//!
//! # Environment Variables
//!
//! - `LENSED_USER_AGENT`: the `User-Agent` sent when the caller sets none
//! - `LENSED_TIMEOUT_SECS`: default deadline, in whole seconds, for requests
//!   whose options carry no timeout
//! - `LENSED_MAX_REDIRECTS`: upper bound on redirect hops, whatever the
//!   request's own policy asks for
//!
//! # Example
//!
//! ```
//! use lensed::config::TransportConfig;
//!
//! let config = TransportConfig::from_lookup(|key| match key {
//!     "LENSED_TIMEOUT_SECS" => Some("30".to_string()),
//!     _ => None,
//! })?;
//!
//! assert_eq!(config.timeout, Some(std::time::Duration::from_secs(30)));
//! assert_eq!(config.max_redirects, 10);
//! # Ok::<(), lensed::config::ConfigError>(())
//! ```

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Environment variable holding the default `User-Agent`.
pub const USER_AGENT_VAR: &str = "LENSED_USER_AGENT";
/// Environment variable holding the default timeout in seconds.
pub const TIMEOUT_SECS_VAR: &str = "LENSED_TIMEOUT_SECS";
/// Environment variable holding the redirect hop cap.
pub const MAX_REDIRECTS_VAR: &str = "LENSED_MAX_REDIRECTS";

const DEFAULT_USER_AGENT: &str = concat!("lensed/", env!("CARGO_PKG_VERSION"));
const DEFAULT_MAX_REDIRECTS: u32 = 10;
const DEFAULT_BODY_LIMIT: u64 = 10 * 1024 * 1024;

/// Configuration error types.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

/// Settings shared by every request a transport executes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    /// `User-Agent` sent when the request carries none.
    pub user_agent: String,
    /// Deadline for requests whose options carry no timeout.
    pub timeout: Option<Duration>,
    /// Cap on redirect hops.
    pub max_redirects: u32,
    /// Largest response body that will be buffered, in bytes.
    pub body_limit: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl TransportConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is not valid
    /// Unicode or cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut failure = None;
        let config = Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                failure.get_or_insert_with(|| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "value is not valid Unicode".to_string(),
                });
                None
            }
        });
        match failure {
            Some(error) => Err(error),
            None => config,
        }
    }

    /// Loads configuration from the process environment, falling back to
    /// [`TransportConfig::default`] when a variable is invalid.
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::or_default(Self::from_env())
    }

    fn or_default(loaded: Result<Self, ConfigError>) -> Self {
        loaded.unwrap_or_else(|error| {
            warn!(%error, "invalid transport configuration, using defaults");
            Self::default()
        })
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable cannot be
    /// parsed.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let user_agent = lookup(USER_AGENT_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.user_agent);

        let timeout = parse_optional::<u64>(TIMEOUT_SECS_VAR, lookup(TIMEOUT_SECS_VAR))?
            .map(Duration::from_secs)
            .or(defaults.timeout);

        let max_redirects = parse_optional::<u32>(MAX_REDIRECTS_VAR, lookup(MAX_REDIRECTS_VAR))?
            .unwrap_or(defaults.max_redirects);

        Ok(Self {
            user_agent,
            timeout,
            max_redirects,
            body_limit: defaults.body_limit,
        })
    }
}

fn parse_optional<T>(key: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|error| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: error.to_string(),
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_set_gives_defaults() {
        let config = TransportConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, TransportConfig::default());
    }

    #[test]
    fn test_invalid_number_names_the_variable() {
        let result = TransportConfig::from_lookup(|key| {
            (key == MAX_REDIRECTS_VAR).then(|| "many".to_string())
        });
        match result {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, MAX_REDIRECTS_VAR),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_value_falls_back_to_defaults() {
        let loaded = TransportConfig::from_lookup(|key| {
            (key == TIMEOUT_SECS_VAR).then(|| "soon".to_string())
        });
        assert!(loaded.is_err());
        assert_eq!(TransportConfig::or_default(loaded), TransportConfig::default());
    }

    #[test]
    fn test_valid_value_is_kept() {
        let loaded = TransportConfig::from_lookup(|key| {
            (key == USER_AGENT_VAR).then(|| "crawler/2".to_string())
        });
        assert_eq!(TransportConfig::or_default(loaded).user_agent, "crawler/2");
    }
}
