use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::OAuth2Error;

/// Query parameters the provider appends to the callback URL
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Anti-forgery state waiting for the provider to call back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingState {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Bearer token returned by the token endpoint
#[derive(Clone, PartialEq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: String,
    #[serde(default)]
    pub(super) token_type: Option<String>,
    #[serde(default)]
    pub(super) expires_in: Option<u64>,
    #[serde(default)]
    pub(super) scope: Option<String>,
}

/// Profile object returned by the provider's user-info endpoint.
///
/// Provider specific fields are kept as-is. The only field the type insists on
/// is a non-empty `id`, so a stored profile is always a complete response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Profile(Map<String, Value>);

impl Profile {
    pub fn from_value(value: Value) -> Result<Self, OAuth2Error> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(OAuth2Error::InvalidProfile(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Provider identifier, stringified when the provider sends a number
    pub fn id(&self) -> String {
        match self.0.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn username(&self) -> Option<&str> {
        self.get_str("username")
    }

    /// `global_name`, then `username`, then `id`
    pub fn display_name(&self) -> String {
        self.get_str("global_name")
            .or_else(|| self.username())
            .map(str::to_string)
            .unwrap_or_else(|| self.id())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Map<String, Value>> for Profile {
    type Error = OAuth2Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let has_id = match map.get("id") {
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(_)) => true,
            _ => false,
        };
        if !has_id {
            return Err(OAuth2Error::InvalidProfile(
                "profile has no usable 'id' field".to_string(),
            ));
        }
        Ok(Self(map))
    }
}

impl From<Profile> for Map<String, Value> {
    fn from(profile: Profile) -> Self {
        profile.0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
