use http::HeaderMap;

use crate::config::{ConfigLookup, env_lookup};
use crate::oauth2::{OAuth2Client, ProviderConfig, Profile};
use crate::session::{SessionConfig, SessionData, SessionStore};

use super::errors::CoordinationError;

/// Everything a request handler needs: the OAuth client and the session store.
///
/// Constructed once at startup and shared (usually as `Arc<AuthContext>`);
/// nothing in it changes per request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    client: OAuth2Client,
    sessions: SessionStore,
}

impl AuthContext {
    pub fn new(
        provider: ProviderConfig,
        session: SessionConfig,
    ) -> Result<Self, CoordinationError> {
        let client = OAuth2Client::new(provider)?;
        Ok(Self {
            client,
            sessions: SessionStore::new(session),
        })
    }

    /// Reads provider and session settings; fails on the first missing secret.
    pub fn from_env() -> Result<Self, CoordinationError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &impl ConfigLookup) -> Result<Self, CoordinationError> {
        let provider = ProviderConfig::from_lookup(lookup)?;
        let session = SessionConfig::from_lookup(lookup)?;
        tracing::info!(
            "Configured OAuth2 provider '{}' with callback {}",
            provider.name,
            provider.redirect_uri
        );
        Self::new(provider, session)
    }

    pub fn client(&self) -> &OAuth2Client {
        &self.client
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// True when `provider` names the configured provider
    pub fn is_provider(&self, provider: &str) -> bool {
        self.client.provider_name() == provider
    }

    pub fn load_session(&self, headers: &HeaderMap) -> SessionData {
        self.sessions.load(headers)
    }

    /// The profile stored in the request's session, if the visitor is logged in
    pub fn current_user(&self, headers: &HeaderMap) -> Option<Profile> {
        self.sessions.load(headers).user
    }
}

