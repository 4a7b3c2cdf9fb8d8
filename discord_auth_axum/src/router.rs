use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    LatencyUnit,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use discord_auth::AuthContext;

use crate::oauth2::{callback, login, logout};

/// Login, callback and logout routes, mounted at the application root.
///
/// - `GET /login/{provider}`
/// - `GET /auth/{provider}/callback`
/// - `GET /logout`
///
/// Requests are traced at INFO level. Headers stay out of the spans since
/// they carry the session cookie.
pub fn auth_router(ctx: Arc<AuthContext>) -> Router {
    auth_router_no_trace(ctx).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`auth_router`] without the trace layer, for applications that
/// install their own.
pub fn auth_router_no_trace(ctx: Arc<AuthContext>) -> Router {
    Router::new()
        .route("/login/{provider}", get(login))
        .route("/auth/{provider}/callback", get(callback))
        .route("/logout", get(logout))
        .with_state(ctx)
}
