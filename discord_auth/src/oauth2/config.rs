use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::config::{
    ConfigError, ConfigLookup, env_lookup, optional, parsed_or, required, seconds_in_range,
};

pub(crate) const DEFAULT_PROVIDER_NAME: &str = "discord";
pub(crate) const DEFAULT_AUTH_URL: &str = "https://discord.com/api/oauth2/authorize";
pub(crate) const DEFAULT_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
pub(crate) const DEFAULT_USERINFO_URL: &str = "https://discord.com/api/users/@me";
pub(crate) const DEFAULT_SCOPE: &str = "identify guilds";
const DEFAULT_STATE_MAX_AGE: u64 = 600;
/// One day
const MAX_STATE_MAX_AGE: u64 = 24 * 60 * 60;
const DEFAULT_HTTP_TIMEOUT: u64 = 10;

/// How the client authenticates itself at the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAuthMethod {
    /// HTTP Basic authentication with client id and secret
    ClientSecretBasic,
    /// Client id and secret sent as form fields
    ClientSecretPost,
}

impl TokenAuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientSecretBasic => "client_secret_basic",
            Self::ClientSecretPost => "client_secret_post",
        }
    }
}

impl FromStr for TokenAuthMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client_secret_basic" => Ok(Self::ClientSecretBasic),
            "client_secret_post" => Ok(Self::ClientSecretPost),
            _ => Err(format!(
                "'{s}' must be 'client_secret_basic' or 'client_secret_post'"
            )),
        }
    }
}

/// Immutable settings for the single configured identity provider.
///
/// Built once at startup and shared by reference with every request.
#[derive(Clone)]
pub struct ProviderConfig {
    pub name: String,
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: Url,
    pub token_url: Url,
    pub userinfo_url: Url,
    pub scopes: Vec<String>,
    pub prompt: Option<String>,
    pub token_auth_method: TokenAuthMethod,
    pub redirect_uri: Url,
    pub state_max_age: Duration,
    pub http_timeout: Duration,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("auth_url", &self.auth_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("userinfo_url", &self.userinfo_url.as_str())
            .field("scopes", &self.scopes)
            .field("prompt", &self.prompt)
            .field("token_auth_method", &self.token_auth_method)
            .field("redirect_uri", &self.redirect_uri.as_str())
            .field("state_max_age", &self.state_max_age)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &impl ConfigLookup) -> Result<Self, ConfigError> {
        let name = optional(lookup, "OAUTH2_PROVIDER_NAME")
            .unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_string());
        let client_id = required(lookup, "DISCORD_CLIENT_ID")?;
        let client_secret = required(lookup, "DISCORD_CLIENT_SECRET")?;
        let origin = required(lookup, "ORIGIN")?;

        let auth_url = url_or(lookup, "OAUTH2_AUTH_URL", DEFAULT_AUTH_URL)?;
        let token_url = url_or(lookup, "OAUTH2_TOKEN_URL", DEFAULT_TOKEN_URL)?;
        let userinfo_url = url_or(lookup, "OAUTH2_USERINFO_URL", DEFAULT_USERINFO_URL)?;

        let scopes = parse_scopes(
            &optional(lookup, "OAUTH2_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
        );
        let prompt = optional(lookup, "OAUTH2_PROMPT");
        let token_auth_method = parsed_or(
            lookup,
            "OAUTH2_TOKEN_AUTH_METHOD",
            TokenAuthMethod::ClientSecretBasic,
        )?;

        let state_max_age = Duration::from_secs(seconds_in_range(
            lookup,
            "OAUTH2_STATE_MAX_AGE",
            DEFAULT_STATE_MAX_AGE,
            MAX_STATE_MAX_AGE,
        )?);
        let http_timeout = Duration::from_secs(parsed_or(
            lookup,
            "OAUTH2_HTTP_TIMEOUT",
            DEFAULT_HTTP_TIMEOUT,
        )?);

        let redirect_uri = callback_url(&origin, &name)?;

        Ok(Self {
            name,
            client_id,
            client_secret,
            auth_url,
            token_url,
            userinfo_url,
            scopes,
            prompt,
            token_auth_method,
            redirect_uri,
            state_max_age,
            http_timeout,
        })
    }

    /// Space separated scope list as sent to the provider
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

/// Path of the callback route for a provider, relative to the origin
pub fn callback_path(provider: &str) -> String {
    format!("/auth/{provider}/callback")
}

pub(crate) fn callback_url(origin: &str, provider: &str) -> Result<Url, ConfigError> {
    let origin = origin.trim_end_matches('/');
    let raw = format!("{origin}{}", callback_path(provider));
    Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        name: "ORIGIN".to_string(),
        reason: e.to_string(),
    })
}

fn url_or(lookup: &impl ConfigLookup, name: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = optional(lookup, name).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

// Accepts both "identify guilds" and the "identify+guilds" form
fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == '+' || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
