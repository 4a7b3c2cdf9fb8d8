use std::time::Duration;

use chrono::Utc;
use subtle::ConstantTimeEq;

use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::{AuthResponse, PendingState};
use crate::utils::gen_random_string;

/// Creates the HTTP client shared by the token and profile calls.
///
/// - `timeout`: bounds each outbound call; a timeout counts as a failed
///   exchange or fetch.
/// - `pool_idle_timeout` / `pool_max_idle_per_host`: reqwest defaults, kept
///   explicit so concurrent logins reuse connections to the provider.
pub(crate) fn get_client(timeout: Duration) -> Result<reqwest::Client, OAuth2Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()
        .map_err(|e| OAuth2Error::Internal(format!("Failed to create reqwest client: {e}")))
}

pub(super) fn generate_pending_state(max_age: Duration) -> Result<PendingState, OAuth2Error> {
    let token = gen_random_string(32)?;
    let max_age = chrono::Duration::from_std(max_age)
        .map_err(|e| OAuth2Error::Internal(format!("Invalid state max age: {e}")))?;
    let expires_at = Utc::now()
        .checked_add_signed(max_age)
        .ok_or_else(|| OAuth2Error::Internal("State max age out of range".to_string()))?;
    Ok(PendingState { token, expires_at })
}

/// Checks the callback against the state stored in the session and returns the code.
pub(super) fn validate_callback<'a>(
    response: &'a AuthResponse,
    pending: Option<&PendingState>,
) -> Result<&'a str, OAuth2Error> {
    let pending = pending.ok_or(OAuth2Error::StateMissing)?;

    let returned = response.state.as_deref().unwrap_or_default();
    if !bool::from(returned.as_bytes().ct_eq(pending.token.as_bytes())) {
        tracing::debug!("State in callback does not match the state in session");
        return Err(OAuth2Error::StateMismatch);
    }

    if Utc::now() > pending.expires_at {
        tracing::debug!("State expired at {}", pending.expires_at);
        return Err(OAuth2Error::StateExpired);
    }

    if let Some(error) = &response.error {
        return Err(OAuth2Error::ProviderDenied {
            error: error.clone(),
            description: response.error_description.clone(),
        });
    }

    response
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or(OAuth2Error::MissingCode)
}
