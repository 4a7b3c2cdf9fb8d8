use std::fmt;

use crate::config::{
    ConfigError, ConfigLookup, env_lookup, optional, parsed_or, required, seconds_in_range,
};

pub(crate) const DEFAULT_SESSION_COOKIE_NAME: &str = "session";
/// Two weeks, in seconds
pub(crate) const DEFAULT_SESSION_COOKIE_MAX_AGE: u64 = 14 * 24 * 60 * 60;
/// Browsers cap cookie lifetimes at 400 days
const MAX_SESSION_COOKIE_MAX_AGE: u64 = 400 * 24 * 60 * 60;
const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

/// Settings for the signed session cookie
#[derive(Clone)]
pub struct SessionConfig {
    pub secret: Vec<u8>,
    pub cookie_name: String,
    pub max_age: u64,
    pub secure: bool,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("cookie_name", &self.cookie_name)
            .field("max_age", &self.max_age)
            .field("secure", &self.secure)
            .finish()
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &impl ConfigLookup) -> Result<Self, ConfigError> {
        let secret = required(lookup, "SESSION_SECRET_KEY")?.into_bytes();
        if secret.len() < MIN_RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                "SESSION_SECRET_KEY is shorter than {} bytes; use a longer random value",
                MIN_RECOMMENDED_SECRET_LEN
            );
        }

        let cookie_name = optional(lookup, "SESSION_COOKIE_NAME")
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string());
        if !is_valid_cookie_name(&cookie_name) {
            return Err(ConfigError::Invalid {
                name: "SESSION_COOKIE_NAME".to_string(),
                reason: format!("'{cookie_name}' is not a valid cookie name"),
            });
        }

        let max_age = seconds_in_range(
            lookup,
            "SESSION_COOKIE_MAX_AGE",
            DEFAULT_SESSION_COOKIE_MAX_AGE,
            MAX_SESSION_COOKIE_MAX_AGE,
        )?;

        let https_origin = optional(lookup, "ORIGIN")
            .map(|o| o.to_lowercase().starts_with("https://"))
            .unwrap_or(false);
        let secure = parsed_or(lookup, "SESSION_COOKIE_SECURE", https_origin)?;

        Ok(Self {
            secret,
            cookie_name,
            max_age,
            secure,
        })
    }

    /// Settings for tests and embedders that do not read the environment
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            max_age: DEFAULT_SESSION_COOKIE_MAX_AGE,
            secure: false,
        }
    }
}

// RFC 6265 token characters
fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}
