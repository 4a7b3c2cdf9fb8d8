use std::{
    io::ErrorKind,
    path::{Component, Path as FsPath, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::Response,
    routing::get,
};

use discord_auth_axum::IntoResponseError;

/// `/static/{*path}` served from `root`
pub(crate) fn router(root: PathBuf) -> Router {
    Router::new()
        .route("/static/{*path}", get(serve_static))
        .with_state(Arc::new(root))
}

async fn serve_static(
    State(root): State<Arc<PathBuf>>,
    Path(path): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let not_found = || (StatusCode::NOT_FOUND, "Not Found".to_string());

    let file_path = resolve(&root, &path).ok_or_else(not_found)?;
    let bytes = match tokio::fs::read(&file_path).await {
        Ok(bytes) => bytes,
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
            tracing::debug!("Static file not found: {}", path);
            return Err(not_found());
        }
        Err(e) => {
            tracing::error!("Failed to read {}: {}", file_path.display(), e);
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type(&file_path))
        .body(Body::from(bytes))
        .into_response_error()
}

/// Joins `requested` under `root`, refusing anything that could leave it
fn resolve(root: &FsPath, requested: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    let mut any = false;
    for component in FsPath::new(requested).components() {
        match component {
            Component::Normal(part) => {
                path.push(part);
                any = true;
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    any.then_some(path)
}

fn content_type(path: &FsPath) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
