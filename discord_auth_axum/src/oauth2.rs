use std::sync::Arc;

use axum::{
    extract::{Path, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use http::{HeaderMap, StatusCode};

use discord_auth::{AuthContext, AuthResponse, authorize_core, logout_core, prepare_login_core};

use crate::error::{IntoResponseError, found};

/// Where every flow ends, whether it succeeded or not
pub(crate) const HOME_PATH: &str = "/";

fn ensure_provider(ctx: &AuthContext, provider: &str) -> Result<(), (StatusCode, String)> {
    if ctx.is_provider(provider) {
        Ok(())
    } else {
        tracing::debug!("Unknown provider requested: {}", provider);
        Err((StatusCode::NOT_FOUND, format!("Unknown provider: {provider}")))
    }
}

pub(crate) async fn login(
    State(ctx): State<Arc<AuthContext>>,
    Path(provider): Path<String>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    ensure_provider(&ctx, &provider)?;

    let (auth_url, set_cookie) = prepare_login_core(&ctx, &headers).into_response_error()?;
    tracing::debug!("Redirecting to {} authorization endpoint", provider);
    Ok((set_cookie, found(&auth_url)?).into_response())
}

/// Provider callback. Failures are logged and the visitor is sent home with
/// the session left as it was.
pub(crate) async fn callback(
    State(ctx): State<Arc<AuthContext>>,
    Path(provider): Path<String>,
    headers: HeaderMap,
    query: Result<Query<AuthResponse>, QueryRejection>,
) -> Result<Response, (StatusCode, String)> {
    ensure_provider(&ctx, &provider)?;

    let auth_response = match query {
        Ok(Query(auth_response)) => auth_response,
        Err(e) => {
            tracing::error!(provider = %provider, error = %e, "Unreadable callback query");
            return found(HOME_PATH);
        }
    };

    match authorize_core(&ctx, &headers, &auth_response).await {
        Ok((set_cookie, profile)) => {
            tracing::debug!("Stored profile for user {} in session", profile.id());
            Ok((set_cookie, found(HOME_PATH)?).into_response())
        }
        Err(e) => {
            tracing::error!(
                provider = %provider,
                error = %e,
                "Error while authenticating with provider"
            );
            found(HOME_PATH)
        }
    }
}

pub(crate) async fn logout(
    State(ctx): State<Arc<AuthContext>>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    let set_cookie = logout_core(&ctx, &headers).into_response_error()?;
    Ok((set_cookie, found(HOME_PATH)?).into_response())
}
