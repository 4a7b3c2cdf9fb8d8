//! In-process stand-in for the Discord OAuth2 endpoints
//!
//! Each test starts its own server on an ephemeral port, so tests never
//! share provider state.

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::{net::TcpListener, task::JoinHandle};
use uuid::Uuid;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";

/// How the mock answers the next requests
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderMode {
    Ok,
    TokenError,
    ProfileError,
}

#[derive(Default)]
struct Recorded {
    token_requests: AtomicUsize,
    profile_requests: AtomicUsize,
    issued_codes: Mutex<Vec<String>>,
    issued_tokens: Mutex<Vec<String>>,
    bearer_tokens: Mutex<Vec<String>>,
}

#[derive(Clone)]
struct MockState {
    mode: Arc<Mutex<ProviderMode>>,
    profile: Arc<Mutex<Value>>,
    recorded: Arc<Recorded>,
}

pub struct MockProvider {
    pub base_url: String,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockProvider {
    pub async fn start() -> Self {
        let state = MockState {
            mode: Arc::new(Mutex::new(ProviderMode::Ok)),
            profile: Arc::new(Mutex::new(json!({
                "id": "80351110224678912",
                "username": "nelly",
                "global_name": "Nelly",
                "avatar": "8342729096ea3675442027381ff50dfe",
                "locale": "en-US",
                "verified": true
            }))),
            recorded: Arc::new(Recorded::default()),
        };

        let app = Router::new()
            .route("/oauth2/token", post(token))
            .route("/users/@me", get(userinfo))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock provider");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock provider");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    pub fn set_mode(&self, mode: ProviderMode) {
        *self.state.mode.lock().unwrap() = mode;
    }

    pub fn set_profile(&self, profile: Value) {
        *self.state.profile.lock().unwrap() = profile;
    }

    pub fn token_requests(&self) -> usize {
        self.state.recorded.token_requests.load(Ordering::SeqCst)
    }

    pub fn profile_requests(&self) -> usize {
        self.state.recorded.profile_requests.load(Ordering::SeqCst)
    }

    /// Registers a code the token endpoint will accept once
    pub fn issue_code(&self) -> String {
        let code = format!("code-{}", Uuid::new_v4());
        self.state
            .recorded
            .issued_codes
            .lock()
            .unwrap()
            .push(code.clone());
        code
    }

    pub fn issued_tokens(&self) -> Vec<String> {
        self.state.recorded.issued_tokens.lock().unwrap().clone()
    }

    pub fn bearer_tokens(&self) -> Vec<String> {
        self.state.recorded.bearer_tokens.lock().unwrap().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn error(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

async fn token(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state
        .recorded
        .token_requests
        .fetch_add(1, Ordering::SeqCst);

    if *state.mode.lock().unwrap() == ProviderMode::TokenError {
        return error(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "server_error"}),
        );
    }

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Basic "));
    if !authorized {
        return error(StatusCode::UNAUTHORIZED, json!({"error": "invalid_client"}));
    }

    let code = form.get("code").cloned().unwrap_or_default();
    let accepted = {
        let mut codes = state.recorded.issued_codes.lock().unwrap();
        match codes.iter().position(|c| *c == code) {
            Some(i) => {
                codes.remove(i);
                true
            }
            None => false,
        }
    };
    if !accepted || form.get("grant_type").map(String::as_str) != Some("authorization_code") {
        return error(StatusCode::BAD_REQUEST, json!({"error": "invalid_grant"}));
    }

    let access_token = format!("access-{}", Uuid::new_v4());
    state
        .recorded
        .issued_tokens
        .lock()
        .unwrap()
        .push(access_token.clone());

    Json(json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 604800,
        "refresh_token": "unused",
        "scope": "identify guilds"
    }))
    .into_response()
}

async fn userinfo(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state
        .recorded
        .profile_requests
        .fetch_add(1, Ordering::SeqCst);

    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    if let Some(bearer) = &bearer {
        state
            .recorded
            .bearer_tokens
            .lock()
            .unwrap()
            .push(bearer.clone());
    }

    if *state.mode.lock().unwrap() == ProviderMode::ProfileError {
        return error(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"message": "500: Internal Server Error"}),
        );
    }

    let known = bearer.is_some_and(|b| state.recorded.issued_tokens.lock().unwrap().contains(&b));
    if !known {
        return error(
            StatusCode::UNAUTHORIZED,
            json!({"message": "401: Unauthorized", "code": 0}),
        );
    }

    Json(state.profile.lock().unwrap().clone()).into_response()
}
