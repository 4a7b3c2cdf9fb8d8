use crate::common::{MockBrowser, TestServer, location, query_param};
use discord_auth::{SessionCodec, SessionData};
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;

async fn logged_in_browser(server: &TestServer) -> MockBrowser {
    let browser = MockBrowser::new(&server.base_url);
    let authorize = browser.start_login("discord").await;
    let state = query_param(&authorize, "state").expect("state");
    let code = server.provider.issue_code();
    browser.callback("discord", &code, &state).await;
    assert!(!browser.whoami().await["user"].is_null());
    browser
}

#[tokio::test]
async fn test_no_cookie_is_anonymous() {
    let server = TestServer::start().await;
    let browser = MockBrowser::new(&server.base_url);
    assert_eq!(browser.whoami().await, json!({ "user": null }));
}

#[tokio::test]
async fn test_logout_returns_to_anonymous() {
    let server = TestServer::start().await;
    let browser = logged_in_browser(&server).await;

    let response = browser.get("/logout").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response).as_deref(), Some("/"));
    assert_eq!(browser.whoami().await, json!({ "user": null }));
}

#[tokio::test]
async fn test_logout_when_anonymous_still_redirects() {
    let server = TestServer::start().await;
    let browser = MockBrowser::new(&server.base_url);

    let response = browser.get("/logout").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response).as_deref(), Some("/"));
    assert!(response.headers().get("set-cookie").is_none());

    // Twice in a row is fine too
    let response = browser.get("/logout").await;
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_tampered_cookie_is_anonymous() {
    let server = TestServer::start().await;
    let browser = logged_in_browser(&server).await;

    let cookie = browser.cookie("session").expect("session cookie");
    let (payload, signature) = cookie.split_once('.').expect("signed cookie");
    let mut flipped = signature.chars().collect::<Vec<_>>();
    flipped[0] = if flipped[0] == 'A' { 'B' } else { 'A' };
    browser.set_cookie(
        "session",
        &format!("{payload}.{}", flipped.into_iter().collect::<String>()),
    );

    assert_eq!(browser.whoami().await, json!({ "user": null }));
}

#[tokio::test]
async fn test_cookie_signed_with_other_secret_is_anonymous() {
    let server = TestServer::start().await;
    let browser = MockBrowser::new(&server.base_url);

    let forged = SessionCodec::new(b"some-other-secret-0123456789abcdef".to_vec(), 3600)
        .encode(&SessionData {
            user: Some(
                discord_auth::Profile::from_value(json!({"id": "1", "username": "mallory"}))
                    .expect("profile"),
            ),
            oauth_state: None,
        })
        .expect("encode");
    browser.set_cookie("session", &forged);

    assert_eq!(browser.whoami().await, json!({ "user": null }));
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let server = TestServer::start().await;
    let browser = MockBrowser::new(&server.base_url);

    let response = browser.get("/login/discord").await;
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("set-cookie")
        .to_string();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=1209600"));
    // Plain-http origin
    assert!(!set_cookie.contains("Secure"));
}

#[tokio::test]
async fn test_expired_session_is_anonymous() {
    let server = TestServer::start_with(&[("SESSION_COOKIE_MAX_AGE", "1")]).await;
    let browser = logged_in_browser(&server).await;

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(browser.whoami().await, json!({ "user": null }));
}

#[tokio::test]
async fn test_custom_cookie_name() {
    let server = TestServer::start_with(&[("SESSION_COOKIE_NAME", "discord_session")]).await;
    let browser = logged_in_browser(&server).await;
    assert!(browser.cookie("discord_session").is_some());
    assert!(browser.cookie("session").is_none());
}

#[tokio::test]
async fn test_login_while_logged_in_keeps_user_until_callback() {
    let server = TestServer::start().await;
    let browser = logged_in_browser(&server).await;

    browser.start_login("discord").await;
    let view = browser.whoami().await;
    assert_eq!(view["user"]["id"], "80351110224678912");
    assert!(server.ctx.is_provider("discord"));
}
