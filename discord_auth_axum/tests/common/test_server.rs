use axum::{Json, Router, routing::get};
use discord_auth::AuthContext;
use discord_auth_axum::{AuthUser, auth_router};
use serde_json::{Value, json};
use std::sync::{Arc, Once};
use tokio::{net::TcpListener, task::JoinHandle};

use super::mock_provider::{CLIENT_ID, CLIENT_SECRET, MockProvider};

pub const SESSION_SECRET: &str = "integration-test-secret-0123456789abcdef";

fn init_test_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// `/` reports the session's user as JSON; `null` when anonymous
async fn whoami(user: Option<AuthUser>) -> Json<Value> {
    match user {
        Some(user) => Json(json!({
            "user": user.profile.as_map(),
            "display_name": user.display_name(),
        })),
        None => Json(json!({ "user": null })),
    }
}

/// The auth routes wired to a [`MockProvider`], served on an ephemeral port
pub struct TestServer {
    pub base_url: String,
    pub provider: MockProvider,
    pub ctx: Arc<AuthContext>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(&[]).await
    }

    /// Starts with extra configuration on top of the test defaults
    pub async fn start_with(extra: &[(&str, &str)]) -> Self {
        init_test_tracing();

        let provider = MockProvider::start().await;
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        let base_url = format!("http://{addr}");

        let token_url = format!("{}/oauth2/token", provider.base_url);
        let userinfo_url = format!("{}/users/@me", provider.base_url);
        let mut vars: Vec<(String, String)> = [
            ("DISCORD_CLIENT_ID", CLIENT_ID),
            ("DISCORD_CLIENT_SECRET", CLIENT_SECRET),
            ("ORIGIN", base_url.as_str()),
            ("SESSION_SECRET_KEY", SESSION_SECRET),
            ("OAUTH2_TOKEN_URL", token_url.as_str()),
            ("OAUTH2_USERINFO_URL", userinfo_url.as_str()),
            ("OAUTH2_HTTP_TIMEOUT", "5"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        // Later entries win, so `extra` overrides the defaults
        let lookup = move |name: &str| {
            vars.iter()
                .rev()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        };
        let ctx = Arc::new(AuthContext::from_lookup(&lookup).expect("auth context"));

        let app = Router::new()
            .route("/", get(whoami))
            .with_state(ctx.clone())
            .merge(auth_router(ctx.clone()));

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });

        Self {
            base_url,
            provider,
            ctx,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
