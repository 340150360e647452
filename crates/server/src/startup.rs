use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::auth::AuthConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(cfg.server.bind_addr().parse()?)
}

/// Build the router over the configured data directory.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    common::env::ensure_env(&cfg.storage.data_dir).await?;
    let auth = AuthConfig::new(cfg.auth.jwt_secret.clone(), cfg.auth.token_ttl_secs);
    let state = AppState::from_data_dir(&cfg.storage.data_dir, auth).await?;
    Ok(routes::build_router(state))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Serve `app` on `listener` until Ctrl+C.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = load_bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, data_dir = %cfg.storage.data_dir, "Server is listening");
    serve(listener, app).await
}
