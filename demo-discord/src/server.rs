use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use tokio::task::JoinHandle;

use crate::config::TlsConfig;

pub(crate) fn spawn_http_server(port: u16, app: Router) -> JoinHandle<std::io::Result<()>> {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tracing::info!("HTTP server listening on {}", addr);
        axum_server::bind(addr)
            .serve(app.into_make_service())
            .await
    })
}

pub(crate) async fn spawn_https_server(
    tls: &TlsConfig,
    app: Router,
) -> std::io::Result<JoinHandle<std::io::Result<()>>> {
    let config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], tls.port));
    tracing::info!("HTTPS server listening on {}", addr);
    Ok(tokio::spawn(async move {
        axum_server::bind_rustls(addr, config)
            .serve(app.into_make_service())
            .await
    }))
}
