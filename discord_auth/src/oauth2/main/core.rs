use url::Url;

use crate::oauth2::config::ProviderConfig;
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::{AccessToken, AuthResponse, PendingState, Profile};
use crate::session::SessionData;

use super::provider::{request_profile, request_token};
use super::utils::{generate_pending_state, get_client, validate_callback};

/// Authorization-code flow against the one configured provider.
///
/// Holds the immutable provider settings and a pooled HTTP client; cheap to
/// share behind an `Arc` across concurrent requests.
#[derive(Debug, Clone)]
pub struct OAuth2Client {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl OAuth2Client {
    pub fn new(config: ProviderConfig) -> Result<Self, OAuth2Error> {
        let http = get_client(config.http_timeout)?;
        Ok(Self { config, http })
    }

    pub fn provider_name(&self) -> &str {
        &self.config.name
    }

    /// Builds the provider authorize URL and records a fresh anti-forgery
    /// state in the session. The caller persists the session and redirects.
    pub fn build_authorization_redirect(
        &self,
        session: &mut SessionData,
    ) -> Result<String, OAuth2Error> {
        let pending = generate_pending_state(self.config.state_max_age)?;
        let auth_url = self.authorization_url(&pending)?;
        session.oauth_state = Some(pending);

        tracing::debug!(
            "Auth URL for provider {}: {}",
            self.config.name,
            auth_url.as_str()
        );
        Ok(auth_url.into())
    }

    fn authorization_url(&self, pending: &PendingState) -> Result<Url, OAuth2Error> {
        let mut url = self.config.auth_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.config.client_id)
                .append_pair("redirect_uri", self.config.redirect_uri.as_str())
                .append_pair("scope", &self.config.scope_string())
                .append_pair("state", &pending.token);
            if let Some(prompt) = &self.config.prompt {
                query.append_pair("prompt", prompt);
            }
        }
        if url.cannot_be_a_base() {
            return Err(OAuth2Error::Url(format!(
                "authorize URL is not absolute: {url}"
            )));
        }
        Ok(url)
    }

    /// Validates the callback against the session's pending state, then
    /// trades the authorization code for an access token.
    ///
    /// The session is not modified here; consuming the state is left to the
    /// caller once the whole callback has succeeded.
    pub async fn exchange_code_for_token(
        &self,
        session: &SessionData,
        response: &AuthResponse,
    ) -> Result<AccessToken, OAuth2Error> {
        let code = validate_callback(response, session.oauth_state.as_ref())?;
        request_token(&self.http, &self.config, code).await
    }

    pub async fn fetch_profile(&self, access_token: &AccessToken) -> Result<Profile, OAuth2Error> {
        request_profile(&self.http, &self.config, access_token).await
    }
}
