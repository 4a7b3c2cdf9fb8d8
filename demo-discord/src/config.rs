use std::{path::PathBuf, str::FromStr};

use discord_auth::{ConfigError, ConfigLookup, env_lookup};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HTTPS_PORT: u16 = 8443;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TlsConfig {
    pub(crate) cert_path: PathBuf,
    pub(crate) key_path: PathBuf,
    pub(crate) port: u16,
}

/// Listener settings for the demo server
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DemoConfig {
    pub(crate) port: u16,
    pub(crate) static_dir: PathBuf,
    pub(crate) tls: Option<TlsConfig>,
}

impl DemoConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub(crate) fn from_lookup(lookup: &impl ConfigLookup) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup
                .get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let static_dir = get("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"));

        let tls = match (get("TLS_CERT_PATH"), get("TLS_KEY_PATH")) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
                port: parse_or(get("HTTPS_PORT"), "HTTPS_PORT", DEFAULT_HTTPS_PORT)?,
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::MissingVar("TLS_KEY_PATH".to_string())),
            (None, Some(_)) => return Err(ConfigError::MissingVar("TLS_CERT_PATH".to_string())),
        };

        Ok(Self {
            port,
            static_dir,
            tls,
        })
    }
}

fn parse_or<T: FromStr>(value: Option<String>, name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}
