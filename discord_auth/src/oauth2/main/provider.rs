use serde_json::Value;

use crate::oauth2::config::{ProviderConfig, TokenAuthMethod};
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::{AccessToken, Profile, TokenResponse};

pub(super) async fn request_token(
    client: &reqwest::Client,
    config: &ProviderConfig,
    code: &str,
) -> Result<AccessToken, OAuth2Error> {
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];

    let request = client.post(config.token_url.clone());
    let request = match config.token_auth_method {
        TokenAuthMethod::ClientSecretBasic => {
            request.basic_auth(&config.client_id, Some(&config.client_secret))
        }
        TokenAuthMethod::ClientSecretPost => {
            form.push(("client_id", config.client_id.as_str()));
            form.push(("client_secret", config.client_secret.as_str()));
            request
        }
    };

    let response = request
        .form(&form)
        .send()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(describe_transport_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Token endpoint returned {}: {}", status, body);
        return Err(OAuth2Error::TokenExchange(format!(
            "token endpoint returned {status}"
        )));
    }

    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(describe_transport_error(&e)))?;
    let token: TokenResponse = serde_json::from_str(&response_body)
        .map_err(|e| OAuth2Error::TokenExchange(format!("malformed token response: {e}")))?;

    tracing::debug!(
        "Token exchange succeeded: token_type={:?}, expires_in={:?}, scope={:?}",
        token.token_type,
        token.expires_in,
        token.scope
    );

    if token.access_token.is_empty() {
        return Err(OAuth2Error::TokenExchange(
            "access_token is empty".to_string(),
        ));
    }
    Ok(AccessToken::new(token.access_token))
}

pub(super) async fn request_profile(
    client: &reqwest::Client,
    config: &ProviderConfig,
    access_token: &AccessToken,
) -> Result<Profile, OAuth2Error> {
    let response = client
        .get(config.userinfo_url.clone())
        .bearer_auth(access_token.secret())
        .send()
        .await
        .map_err(|e| OAuth2Error::FetchProfile(describe_transport_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(OAuth2Error::FetchProfile(format!(
            "user-info endpoint returned {status}"
        )));
    }

    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::FetchProfile(describe_transport_error(&e)))?;
    let value: Value = serde_json::from_str(&response_body)
        .map_err(|e| OAuth2Error::InvalidProfile(format!("body is not JSON: {e}")))?;

    let profile = Profile::from_value(value)?;
    tracing::debug!("Fetched profile for id {}", profile.id());
    Ok(profile)
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else {
        e.to_string()
    }
}
