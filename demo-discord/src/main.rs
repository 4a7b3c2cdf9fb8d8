use std::{process::ExitCode, sync::Arc};

use axum::{Router, routing::get};
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use discord_auth::AuthContext;
use discord_auth_axum::auth_router;

mod config;
mod handlers;
mod server;
mod static_files;

use crate::{
    config::DemoConfig,
    handlers::index,
    server::{spawn_http_server, spawn_https_server},
};

fn app(ctx: Arc<AuthContext>, config: &DemoConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(ctx.clone())
        .merge(static_files::router(config.static_dir.clone()))
        .merge(auth_router(ctx))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,discord_auth=debug,discord_auth_axum=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing credentials stop the process here, before any request is served
    let ctx = match AuthContext::from_env() {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            e.log();
            return ExitCode::FAILURE;
        }
    };
    let config = match DemoConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let app = app(ctx, &config);

    let Some(tls) = &config.tls else {
        return match spawn_http_server(config.port, app).await {
            Ok(Ok(())) => ExitCode::SUCCESS,
            Ok(Err(e)) => {
                tracing::error!("HTTP server error: {}", e);
                ExitCode::FAILURE
            }
            Err(e) => {
                tracing::error!("HTTP server task failed: {}", e);
                ExitCode::FAILURE
            }
        };
    };

    // Install default CryptoProvider for rustls to prevent:
    // "no process-level CryptoProvider available -- call CryptoProvider::install_default() before this point"
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::warn!("A rustls CryptoProvider was already installed");
    }

    let https_server = match spawn_https_server(tls, app.clone()).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(
                "Failed to load TLS certificate {} / key {}: {}",
                tls.cert_path.display(),
                tls.key_path.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };
    let http_server = spawn_http_server(config.port, app);

    // Both servers run until one of them stops
    match tokio::try_join!(http_server, https_server) {
        Ok((Ok(()), Ok(()))) => ExitCode::SUCCESS,
        Ok((Err(e), _)) | Ok((_, Err(e))) => {
            tracing::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("Server task failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
