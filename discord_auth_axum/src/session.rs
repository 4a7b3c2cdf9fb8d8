use std::ops::Deref;
use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use http::{Method, StatusCode, request::Parts};

use discord_auth::{AuthContext, Profile};

use crate::error::found;
use crate::oauth2::HOME_PATH;

pub struct AuthRedirect {
    method: Method,
}

impl AuthRedirect {
    fn new(method: Method) -> Self {
        Self { method }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        if self.method == Method::GET {
            tracing::debug!("Redirecting to {}", HOME_PATH);
            found(HOME_PATH).into_response()
        } else {
            tracing::debug!("Unauthorized");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

/// Logged-in visitor, available as an Axum extractor
///
/// Reads the signed session cookie and yields the stored provider profile.
/// Requests without a valid session are redirected to `/` (GET) or get a
/// 401. Use `Option<AuthUser>` for pages that also serve anonymous visitors.
///
/// The router state must provide an `Arc<AuthContext>` through `FromRef`.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{routing::get, Router};
/// use discord_auth::AuthContext;
/// use discord_auth_axum::AuthUser;
///
/// async fn protected_handler(user: AuthUser) -> String {
///     format!("Hello, {}!", user.display_name())
/// }
///
/// # fn build(ctx: Arc<AuthContext>) {
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler))
///     .with_state(ctx);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub profile: Profile,
}

impl Deref for AuthUser {
    type Target = Profile;

    fn deref(&self) -> &Self::Target {
        &self.profile
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<AuthContext>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = Arc::<AuthContext>::from_ref(state);
        match ctx.current_user(&parts.headers) {
            Some(profile) => Ok(AuthUser { profile }),
            None => Err(AuthRedirect::new(parts.method.clone())),
        }
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    Arc<AuthContext>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let ctx = Arc::<AuthContext>::from_ref(state);
        Ok(ctx
            .current_user(&parts.headers)
            .map(|profile| AuthUser { profile }))
    }
}
