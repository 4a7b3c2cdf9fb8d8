//! Central configuration helpers for the discord_auth crate
//!
//! Every setting is read once at startup through a lookup function. The
//! process environment is the normal source (`from_env`), while tests hand
//! in a map so nothing global is mutated.

use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building configuration at startup
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    MissingVar(String),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Source of configuration values, keyed by variable name
pub trait ConfigLookup {
    fn get(&self, name: &str) -> Option<String>;
}

impl<F> ConfigLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Reads the process environment. Empty values count as unset.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

pub(crate) fn optional(lookup: &impl ConfigLookup, name: &str) -> Option<String> {
    lookup
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn required(lookup: &impl ConfigLookup, name: &str) -> Result<String, ConfigError> {
    optional(lookup, name).ok_or_else(|| ConfigError::MissingVar(name.to_string()))
}

pub(crate) fn parsed_or<T>(
    lookup: &impl ConfigLookup,
    name: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// A number of seconds in `1..=max`, or `default` when unset
pub(crate) fn seconds_in_range(
    lookup: &impl ConfigLookup,
    name: &str,
    default: u64,
    max: u64,
) -> Result<u64, ConfigError> {
    let secs = parsed_or(lookup, name, default)?;
    if secs == 0 || secs > max {
        return Err(ConfigError::Invalid {
            name: name.to_string(),
            reason: format!("{secs} is outside 1..={max} seconds"),
        });
    }
    Ok(secs)
}
