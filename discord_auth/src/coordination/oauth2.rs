use http::HeaderMap;

use crate::oauth2::{AuthResponse, Profile};

use super::context::AuthContext;
use super::errors::CoordinationError;

/// Starts a login: returns the provider authorize URL and the `Set-Cookie`
/// headers carrying the new anti-forgery state.
///
/// Anything already in the session (including a logged-in user) is kept.
pub fn prepare_login_core(
    ctx: &AuthContext,
    headers: &HeaderMap,
) -> Result<(String, HeaderMap), CoordinationError> {
    let mut session = ctx.load_session(headers);
    let auth_url = ctx.client().build_authorization_redirect(&mut session)?;
    let headers = ctx.sessions().store(&session)?;
    Ok((auth_url, headers))
}

/// Completes a login from the provider's callback.
///
/// On success the returned headers store the fetched profile under `user` and
/// drop the consumed state. On failure nothing is written, so whatever the
/// session held before (a previous login included) is left untouched.
pub async fn authorize_core(
    ctx: &AuthContext,
    headers: &HeaderMap,
    auth_response: &AuthResponse,
) -> Result<(HeaderMap, Profile), CoordinationError> {
    let mut session = ctx.load_session(headers);

    let access_token = ctx
        .client()
        .exchange_code_for_token(&session, auth_response)
        .await?;
    let profile = ctx.client().fetch_profile(&access_token).await?;

    session.user = Some(profile.clone());
    session.oauth_state = None;
    let headers = ctx.sessions().store(&session)?;

    tracing::info!(
        "User {} logged in via {}",
        profile.id(),
        ctx.provider_name()
    );
    Ok((headers, profile))
}

/// Removes `user` from the session. Returns no headers when there was no
/// user to remove.
pub fn logout_core(ctx: &AuthContext, headers: &HeaderMap) -> Result<HeaderMap, CoordinationError> {
    let mut session = ctx.load_session(headers);
    let Some(user) = session.user.take() else {
        tracing::debug!("Logout without a logged-in user");
        return Ok(HeaderMap::new());
    };

    tracing::info!("User {} logged out", user.id());
    Ok(ctx.sessions().store(&session)?)
}
