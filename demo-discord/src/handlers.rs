use std::sync::Arc;

use askama::Template;
use axum::{extract::State, http::StatusCode, response::Html};
use serde_json::Value;

use discord_auth_axum::{AuthContext, AuthUser, Profile};

const DISCORD_CDN: &str = "https://cdn.discordapp.com";

/// What the home page shows about a logged-in user
#[derive(Debug, Clone, PartialEq)]
struct UserView {
    display_name: String,
    avatar_url: Option<String>,
    fields: Vec<(String, String)>,
}

impl UserView {
    fn from_profile(profile: &Profile) -> Self {
        let avatar_url = profile
            .get_str("avatar")
            .map(|hash| format!("{DISCORD_CDN}/avatars/{}/{hash}.png", profile.id()));

        // Nested objects and nulls are left out of the table
        let fields = profile
            .fields()
            .filter(|(key, _)| key.as_str() != "avatar")
            .filter_map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((key.clone(), rendered))
            })
            .collect();

        Self {
            display_name: profile.display_name(),
            avatar_url,
            fields,
        }
    }
}

#[derive(Template)]
#[template(path = "index.j2", escape = "html")]
struct IndexTemplate<'a> {
    provider: &'a str,
    user: Option<UserView>,
}

fn render_index(provider: &str, profile: Option<&Profile>) -> Result<String, askama::Error> {
    IndexTemplate {
        provider,
        user: profile.map(UserView::from_profile),
    }
    .render()
}

pub(crate) async fn index(
    State(ctx): State<Arc<AuthContext>>,
    user: Option<AuthUser>,
) -> Result<Html<String>, (StatusCode, String)> {
    let html = render_index(ctx.provider_name(), user.as_deref())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Html(html))
}
